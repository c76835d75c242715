//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! fields accept anything convertible into the declared type.

macro_rules! define_port_error {
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
    define_port_error! {
        pub enum LedgerPortError {
            Storage { message: String } => "ledger storage failed: {message}",
            Capacity { limit: u32 } => "ledger is full at {limit} records",
            Stale { key: String, revision: u32 } => "stale {key} at revision {revision}",
            Offline => "ledger offline",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_text() {
        let err = LedgerPortError::storage("disk full");
        assert_eq!(err.to_string(), "ledger storage failed: disk full");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = LedgerPortError::capacity(12_u32);
        assert_eq!(err, LedgerPortError::Capacity { limit: 12 });
    }

    #[test]
    fn mixed_fields_render_in_order() {
        let err = LedgerPortError::stale("monkGoals", 3_u32);
        assert_eq!(err.to_string(), "stale monkGoals at revision 3");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(LedgerPortError::offline().to_string(), "ledger offline");
    }
}
