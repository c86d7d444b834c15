#[macro_export]
macro_rules! impl_measure_newtype {
    ($name:ty) => {
        impl $name {
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            pub const fn value(self) -> f64 {
                self.0
            }

            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }
    };
}
