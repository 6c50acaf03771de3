//! Consumer side rendering.
//!
//! - [`CarriageReturn`]: line-granular `\r` overwrite emulation
//! - [`Renderer`]: erase/append with editable bracketing and auto-scroll

mod carriage;
mod renderer;

pub use carriage::CarriageReturn;
pub use renderer::Renderer;
