#[macro_export]
macro_rules! impl_id_newtype {
    ($name:ty, $inner:ty) => {
        impl $name {
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }

            pub const fn get(self) -> $inner {
                self.0
            }
        }
    };
}
