//! Graph construction and representation
//!
//! Word co-occurrence graphs (TextRank keyphrases) and sentence similarity
//! graphs (LexRank) share the same builder and CSR storage.

pub mod builder;
pub mod csr;
