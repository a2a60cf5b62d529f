//! Macros for ergonomic state and event definitions.

/// Generate a unit-variant enum implementing [`State`](crate::core::State).
///
/// # Example
///
/// ```
/// use fsmkit::state_enum;
/// use fsmkit::core::State;
///
/// state_enum! {
///     pub enum Door {
///         Initial,
///         Closed,
///         Opened,
///         Terminated,
///         Error,
///     }
///     final: [Terminated, Error]
///     error: [Error]
/// }
///
/// assert_eq!(Door::Closed.name(), "Closed");
/// assert!(Door::Error.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

/// Generate an event enum implementing [`Event`](crate::core::Event).
///
/// Each variant dispatches under its own name. Variants may carry named
/// fields.
///
/// # Example
///
/// ```
/// use fsmkit::event_enum;
/// use fsmkit::core::Event;
///
/// event_enum! {
///     pub enum DoorEvent {
///         Begin { val: i32 },
///         Open,
///         Close,
///     }
/// }
///
/// assert_eq!(DoorEvent::Begin { val: 9 }.name(), "Begin");
/// assert_eq!(DoorEvent::Close.name(), "Close");
/// assert_eq!(DoorEvent::NAMES, &["Begin", "Open", "Close"]);
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $({ $($field:ident : $fty:ty),* $(,)? })?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $({ $($field : $fty),* })?
            ),*
        }

        impl $name {
            /// Every event name this enum dispatches under.
            #[allow(dead_code)]
            pub const NAMES: &'static [&'static str] = &[$(stringify!($variant)),*];
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant { .. } => stringify!($variant)),*
                }
            }
        }
    };
}
