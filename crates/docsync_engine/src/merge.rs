//! Client-side document merging.

/// Merges a local document with the authoritative one returned by the
/// server.
///
/// This is the CRDT library's job; the engine treats both inputs and the
/// result as opaque strings and simply resubmits whatever the merger
/// produces.
pub trait DocMerger: Send + Sync {
    /// Merges `local` with the `authoritative` server document, returning
    /// the document to resubmit.
    fn merge(&self, local: &str, authoritative: &str) -> String;
}

/// A merger that discards local changes in favor of the server document.
///
/// The safe default when no CRDT library is wired in: convergence is
/// immediate, at the cost of dropping the local edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferAuthoritative;

impl DocMerger for PreferAuthoritative {
    fn merge(&self, _local: &str, authoritative: &str) -> String {
        authoritative.to_string()
    }
}

/// Adapts a plain function or closure into a [`DocMerger`].
#[derive(Debug, Clone, Copy)]
pub struct MergeFn<F>(pub F);

impl<F> DocMerger for MergeFn<F>
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn merge(&self, local: &str, authoritative: &str) -> String {
        (self.0)(local, authoritative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefer_authoritative_drops_local() {
        let merged = PreferAuthoritative.merge("local", "server");
        assert_eq!(merged, "server");
    }

    #[test]
    fn closures_adapt_into_mergers() {
        let merger = MergeFn(|local: &str, authoritative: &str| {
            format!("{authoritative}+{local}")
        });
        assert_eq!(merger.merge("l", "s"), "s+l");
    }
}
