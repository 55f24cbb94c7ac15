// Foundational arithmetic operations
pub mod add;
pub mod mul;
pub mod pow;

// Derived from the three above, no backward rule of their own
pub mod div;
pub mod neg;
pub mod sub;
