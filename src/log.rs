/// Aborts on a broken internal invariant.
///
/// These are lifecycle bugs, never runtime conditions, so there is no
/// error value to recover with.
macro_rules! fatal {
    ($fmt:expr) => {
        (panic!(concat!("[FATAL] ", $fmt)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        (panic!(concat!("[FATAL] ", $fmt), $($arg)*))
    };
}
