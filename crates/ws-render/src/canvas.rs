use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ws_core::frame::FrameBuffer;

/// Blit a pixel canvas into a `ratatui::Buffer` with half-block cells.
///
/// Each terminal cell covers 2 vertical pixels: the top pixel becomes the
/// cell background, the bottom pixel the foreground of a '▄'. Pixels are
/// sampled nearest-neighbor, so the canvas does not need to match the
/// terminal area. Direct buffer writes, no Canvas widget.
pub fn render_frame(buf: &mut Buffer, area: Rect, frame: &FrameBuffer) {
    if area.width == 0 || area.height == 0 || frame.width == 0 || frame.height == 0 {
        return;
    }
    let pixel_h = usize::from(area.height) * 2;
    let pixel_w = usize::from(area.width);

    for cy in 0..usize::from(area.height) {
        for cx in 0..usize::from(area.width) {
            let px = cx * frame.width / pixel_w;
            let py_top = cy * 2 * frame.height / pixel_h;
            let py_bot = (cy * 2 + 1) * frame.height / pixel_h;

            let top = frame.pixel(px, py_top.min(frame.height - 1));
            let bot = frame.pixel(px, py_bot.min(frame.height - 1));

            let buf_x = area.x + cx as u16;
            let buf_y = area.y + cy as u16;
            if let Some(cell) = buf.cell_mut((buf_x, buf_y)) {
                cell.set_char('▄');
                cell.set_fg(Color::Rgb(bot.0, bot.1, bot.2));
                // Black top stays the terminal default so unlit canvas
                // regions do not paint over widgets behind them.
                if top == (0, 0, 0) {
                    cell.set_bg(Color::Reset);
                } else {
                    cell.set_bg(Color::Rgb(top.0, top.1, top.2));
                }
            }
        }
    }
}
