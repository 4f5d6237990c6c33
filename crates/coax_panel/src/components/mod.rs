mod controls;
mod fields;
mod notices;
mod tabs;

pub use controls::{ButtonBar, SaveButton};
pub use fields::{FieldList, FieldsetBlock};
pub use notices::NoticeStack;
pub use tabs::{TabBar, TabPanel};
