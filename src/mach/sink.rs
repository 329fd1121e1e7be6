/// ## Output and canvas sinks
///
/// The engine's only side effects leave through these traits. The rendering
/// backend and host embedding live outside the core; the runtime forwards
/// print text and drawing commands and never blocks on them.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

/// Text output sink.
pub trait Output {
    fn print(&mut self, text: &str);
    fn clear(&mut self);
}

/// 2D drawing sink.
pub trait Canvas {
    fn line(&mut self, a: Point, b: Point);
    fn rect(&mut self, origin: Point, size: Size);
    fn pixel(&mut self, p: Point);
    fn clear(&mut self);
    fn present(&mut self);
}

/// Prints each scalar on its own line to stdout.
#[derive(Default)]
pub struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn print(&mut self, text: &str) {
        println!("{}", text);
    }
    fn clear(&mut self) {
        // scrollback is the host terminal's; nothing sensible to clear
    }
}

/// Discards drawing commands, for hosts without a rendering backend.
#[derive(Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn line(&mut self, _a: Point, _b: Point) {}
    fn rect(&mut self, _origin: Point, _size: Size) {}
    fn pixel(&mut self, _p: Point) {}
    fn clear(&mut self) {}
    fn present(&mut self) {}
}
