#[cfg(feature = "log")]
#[allow(unused_imports)]
pub(crate) use log::{debug, error, info, trace, warn};

#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
pub(crate) use self::noop::{debug, error, info, trace, warn};

#[cfg(not(feature = "log"))]
mod noop {
    #[allow(unused_macros)]
    macro_rules! debug {
        ( $( $e:expr ),* $(,)* ) => {
            if false {
                $(
                    let _ = $e;
                )*
            }
        }
    }

    #[allow(unused_macros)]
    macro_rules! error {
        ( $( $e:expr ),* $(,)* ) => {
            if false {
                $(
                    let _ = $e;
                )*
            }
        }
    }

    #[allow(unused_macros)]
    macro_rules! info {
        ( $( $e:expr ),* $(,)* ) => {
            if false {
                $(
                    let _ = $e;
                )*
            }
        }
    }

    #[allow(unused_macros)]
    macro_rules! trace {
        ( $( $e:expr ),* $(,)* ) => {
            if false {
                $(
                    let _ = $e;
                )*
            }
        }
    }

    #[allow(unused_macros)]
    macro_rules! warn {
        ( $( $e:expr ),* $(,)* ) => {
            if false {
                $(
                    let _ = $e;
                )*
            }
        }
    }

    #[allow(unused_imports)]
    pub(crate) use {debug, error, info, trace, warn};
}
