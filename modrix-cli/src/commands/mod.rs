//! CLI command implementations

pub mod elements;
pub mod item;
pub mod new;

pub use elements::ElementsCommand;
pub use item::ItemCommand;
pub use new::NewCommand;
