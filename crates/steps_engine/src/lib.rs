pub mod algebra;
pub mod calculus;
pub mod classify;
pub mod dispatch;
pub mod domains;
pub mod error;
pub mod eval;
pub mod extract;
pub mod fallback;
pub mod generic;
pub mod record;
pub mod report;
pub mod segment;
pub mod simplify;
pub mod solve;

pub use classify::{classify, GENERAL_LABEL};
pub use dispatch::{routes, solve_problem};
pub use error::SolveError;
pub use fallback::fallback;
pub use record::{SolutionRecord, Step, VisualizationHint};
pub use report::{render_markdown, render_markdown_batch};
pub use segment::segment;
pub use simplify::Simplifier;
pub use solve::solve;
