/// External layout collaborator notified on window resize
pub trait Layout: Send {
    fn recompute(&mut self, width: u32, height: u32);
}

/// Layout that only records the resize in the log
#[derive(Debug, Default)]
pub struct TracingLayout;

impl Layout for TracingLayout {
    fn recompute(&mut self, width: u32, height: u32) {
        tracing::info!("Layout recompute requested ({}x{})", width, height);
    }
}
