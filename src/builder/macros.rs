//! Macros for declaring state sets.

/// Declare a closed set of states.
///
/// Derives everything the engine needs plus serde, and adds an `ALL`
/// constant, a `name()` method and a `Display` impl that prints the
/// variant name. The calling crate must depend on `serde`.
///
/// # Example
///
/// ```
/// use tickstate::state_enum;
///
/// state_enum! {
///     pub enum PlayerState {
///         Standing,
///         Running,
///         Jumping,
///         Falling,
///         Dodging,
///         Attacking,
///     }
/// }
///
/// assert_eq!(PlayerState::ALL.len(), 6);
/// assert_eq!(PlayerState::Dodging.name(), "Dodging");
/// assert_eq!(PlayerState::Falling.to_string(), "Falling");
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

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
