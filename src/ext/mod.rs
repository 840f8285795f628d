pub mod eyre;
pub mod fs;
pub mod path;
pub mod util;

pub use path::PathExt;
pub use util::StrAdditions;

use clap::builder::styling::{Color, Style};

pub trait Paint {
    fn paint(&self, text: impl std::fmt::Display) -> String;
}

impl Paint for Color {
    fn paint(&self, text: impl std::fmt::Display) -> String {
        let style = Style::new().fg_color(Some(*self));
        format!("{style}{text}{style:#}")
    }
}
