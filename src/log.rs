/*
 * Logging shims.
 *
 * On the board the library logs through defmt. On the host (unit tests) the
 * macros expand to nothing, but still reference their arguments so that the
 * call sites build the same way with and without the `defmt` feature.
 */

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($crate::log::unused!($($arg)*));
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($crate::log::unused!($($arg)*));
    }};
}

// Swallows the format string and touches each argument once.
#[cfg(not(feature = "defmt"))]
macro_rules! unused {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        ($(&$arg,)*)
    };
}

pub(crate) use {debug, info};
#[cfg(not(feature = "defmt"))]
pub(crate) use unused;
