//! `define_port_error!`: declares a repository error enum with its
//! `thiserror` display strings and one snake_case constructor per variant.
//!
//! Struct-variant constructors take `impl Into<T>` per field, so
//! `TaskRepositoryError::query("timeout")` works with a `&str`.

macro_rules! define_port_error {
    // Unit variant.
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum LedgerError {
            Unavailable { message: String } => "ledger unavailable: {message}",
            Rejected { entry: String, attempts: u32 } => "entry {entry} rejected ({attempts} tries)",
            Sealed => "ledger is sealed",
        }
    }

    #[rstest]
    #[case(LedgerError::unavailable("pool closed"), "ledger unavailable: pool closed")]
    #[case(
        LedgerError::rejected(String::from("t-1"), 3_u32),
        "entry t-1 rejected (3 tries)"
    )]
    #[case(LedgerError::sealed(), "ledger is sealed")]
    fn constructors_render_their_messages(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn string_fields_accept_borrowed_text() {
        assert_eq!(
            LedgerError::unavailable("down"),
            LedgerError::Unavailable {
                message: "down".to_owned()
            }
        );
    }
}
