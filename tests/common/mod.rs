#![allow(dead_code)]

use block::lang::Error;
use block::mach::{Canvas, Output, Point, Rand, Runtime, Size};

/// Output sink that records printed lines and clears.
#[derive(Default)]
pub struct Recorder {
    pub printed: Vec<String>,
    pub cleared: usize,
}

impl Output for Recorder {
    fn print(&mut self, text: &str) {
        self.printed.push(text.to_string());
    }
    fn clear(&mut self) {
        self.printed.clear();
        self.cleared += 1;
    }
}

/// One recorded drawing command.
#[derive(Debug, PartialEq)]
pub enum Draw {
    Line(Point, Point),
    Rect(Point, Size),
    Pixel(Point),
    Clear,
}

/// Canvas sink that records commands instead of rendering.
#[derive(Default)]
pub struct Screen {
    pub commands: Vec<Draw>,
    pub presented: usize,
}

impl Canvas for Screen {
    fn line(&mut self, a: Point, b: Point) {
        self.commands.push(Draw::Line(a, b));
    }
    fn rect(&mut self, origin: Point, size: Size) {
        self.commands.push(Draw::Rect(origin, size));
    }
    fn pixel(&mut self, p: Point) {
        self.commands.push(Draw::Pixel(p));
    }
    fn clear(&mut self) {
        self.commands.push(Draw::Clear);
    }
    fn present(&mut self) {
        self.presented += 1;
    }
}

/// Deterministic random source yielding a fixed sequence, then the minimum.
pub struct SeqRand(pub Vec<i64>);

impl Rand for SeqRand {
    fn range(&mut self, min: i64, _max: i64) -> i64 {
        if self.0.is_empty() {
            min
        } else {
            self.0.remove(0)
        }
    }
}

/// Load and run a program to completion, returning what it printed.
pub fn exec(source: &str) -> Result<Vec<String>, Error> {
    let mut out = Recorder::default();
    let mut screen = Screen::default();
    exec_with(source, &mut out, &mut screen)?;
    Ok(out.printed)
}

/// Load and run a program against caller-supplied sinks.
pub fn exec_with(source: &str, out: &mut Recorder, screen: &mut Screen) -> Result<(), Error> {
    let mut runtime = Runtime::new();
    runtime.load(source)?;
    runtime.run(out, screen)
}
