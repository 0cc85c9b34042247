/// Logs agent internals through the `log` crate under the `rum` target.
///
/// The agent never surfaces failures to the page; this is the only place
/// dropped batches, unsupported channels and flushes become visible.
#[macro_export]
#[doc(hidden)]
macro_rules! rum_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!(target: "rum", $($arg)*)
    };
}
