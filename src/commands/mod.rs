//! CLI command implementations.
//!
//! One module per subcommand:
//! - **collect**: download raw indicator series
//! - **index**: compute the ranked index
//! - **render**: write charts and the HTML report
//! - **view**: print the ranked index
//! - **run**: collect, index, and render in one go
//! - **init**: write a default configuration file
//!
//! Handlers return `anyhow::Result` and print user-facing progress;
//! library code below them only logs.

pub mod collect;
pub mod index;
pub mod init;
pub mod render;
pub mod run;
pub mod view;

pub use collect::{collect_data, handle_collect};
pub use index::{compute_index, IndexOptions};
pub use init::init_config;
pub use render::handle_render;
pub use run::{handle_run, RunOptions};
pub use view::{handle_view, ViewOptions};
