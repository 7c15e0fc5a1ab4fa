//! The GFD script evaluator.
//!
//! A `.gfd` script is a sequence of whitespace-tokenized statements:
//! construction statements in postfix notation, boolean queries, macro
//! definitions and imports. [`Evaluator`] runs one script against a
//! fresh [`gfd_figure::Figure`], saturates the property store through
//! `gfd-infer` when the script finishes, and returns an [`Evaluation`]
//! exposing the bound objects, the figure and the query results.
//!
//! ```
//! use gfd_eval::{Evaluator, MemoryLoader};
//!
//! let loader = MemoryLoader::new().with(
//!     "centers.gfd",
//!     "A B C = triangle\nO = A B C circumcenter\n? O A B is_collinear",
//! );
//! let eval = Evaluator::new(loader).run("centers").unwrap();
//! assert_eq!(eval.queries, vec![false]);
//! ```

pub mod evaluator;
pub mod export;
pub mod loader;
pub mod statement;

pub use evaluator::{Evaluation, Evaluator};
pub use export::FigureExport;
pub use loader::{FsLoader, MemoryLoader, ScriptLoader};
pub use statement::Statement;
