use crate::shader::source::{ShaderError, ShaderResult, ShaderSource};

/// Token in a wrapper shader replaced by the fragment body
pub const FRAGMENT_MARKER: &str = "{{CURSOR_FRAGMENT}}";

/// Splice `fragment` into `wrapper` at the first marker
pub fn compose(wrapper_name: &str, wrapper: &str, fragment: &str) -> ShaderResult<String> {
    if !wrapper.contains(FRAGMENT_MARKER) {
        return Err(ShaderError::MissingMarker(wrapper_name.to_string()));
    }
    Ok(wrapper.replacen(FRAGMENT_MARKER, fragment, 1))
}

/// Fetch the fragment and, when a wrapper is named, compose the two
pub async fn load_program(
    source: &dyn ShaderSource,
    fragment: &str,
    wrapper: Option<&str>,
) -> ShaderResult<String> {
    let body = source.fetch(fragment).await?;

    let program = match wrapper {
        Some(wrapper_name) => {
            let wrapper_text = source.fetch(wrapper_name).await?;
            compose(wrapper_name, &wrapper_text, &body)?
        }
        None => body,
    };

    tracing::info!(
        "Loaded cursor program {} ({} bytes, wrapper: {})",
        fragment,
        program.len(),
        wrapper.unwrap_or("none")
    );
    Ok(program)
}
