fn main() -> anyhow::Result<()> {
    cursor_canvas_lib::run()
}
