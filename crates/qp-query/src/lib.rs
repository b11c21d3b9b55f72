//! Plain-English boolean query translation for Lucene.
//!
//! Turns the queries people type into a search box into Lucene query strings:
//!
//! - **Terms**: `apple banana` - adjacent words must all appear
//! - **Phrases**: `"apple pie"` or `'apple pie'` - exact sequences
//! - **Operators**: `and`, `or`, `not` in any case, `and` binding tighter than `or`
//! - **Grouping**: `(apple or banana) not cherry` - precedence control
//! - **Boosting**: extra fields repeat the positive terms with a relevance suffix
//!
//! Punctuation other than quotes and parentheses is ignored.
//!
//! # Example
//!
//! ```
//! use qp_query::Translator;
//!
//! let translator = Translator::new("content");
//! assert_eq!(
//!     translator.translate("apple and banana").unwrap(),
//!     "+(+content:apple +content:banana)"
//! );
//! ```

#![warn(missing_docs)]

mod ast;
mod bind;
mod error;
mod lexer;
mod translator;
mod tree;
mod validate;

pub use ast::Query;
pub use error::{QueryError, QueryErrorKind};
pub use lexer::{Operator, Token, TokenKind, expand, strip_punctuation, tokenize};
pub use translator::{Boost, Explanation, Translator, parse};
