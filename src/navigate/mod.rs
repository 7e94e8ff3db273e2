//! Interactive navigation of a remote's directory tree
//!
//! A [`Navigator`] keeps a single [`cursor::Cursor`] and asks a [`lister::RemoteLister`]
//! for the children of wherever it currently points. Listings are memoized
//! per session by wrapping the lister in a [`CachedLister`].

pub mod cursor;
pub mod lister;
pub mod navigator;

pub use lister::{CachedLister, RcloneLister};
pub use navigator::Navigator;
