//! Thread-safety markers that collapse to nothing without `parallel`.
//!
//! With the feature on, `MaybeSend` is `Send`, `MaybeSync` is `Sync` and
//! `MaybeSendSync` is both. With it off, every type implements all three,
//! so `Rc`-holding element types still work with the sequential kernels.

macro_rules! maybe_marker {
    ($(#[$meta:meta])* $name:ident: $first:path $(, $rest:path)*) => {
        $(#[$meta])*
        #[cfg(feature = "parallel")]
        pub trait $name: $first $(+ $rest)* {}
        #[cfg(feature = "parallel")]
        impl<T: $first $(+ $rest)*> $name for T {}

        $(#[$meta])*
        #[cfg(not(feature = "parallel"))]
        pub trait $name {}
        #[cfg(not(feature = "parallel"))]
        impl<T> $name for T {}
    };
}

maybe_marker!(
    /// `Send` when the `parallel` feature is enabled.
    MaybeSend: Send
);
maybe_marker!(
    /// `Sync` when the `parallel` feature is enabled.
    MaybeSync: Sync
);
maybe_marker!(
    /// `Send + Sync` when the `parallel` feature is enabled.
    MaybeSendSync: Send, Sync
);
