pub mod alignment;
pub mod ranking;
pub mod tokenizer;

pub use alignment::{alignment_score, AlignmentSignals};
pub use ranking::{attach_alignment, paginate, rank, Page, RankingOptions};
