/// Runtime values.
///
/// Defines [`core::Value`], the four kinds of data a Pencil program handles at
/// runtime, along with truthiness, dynamic type names and the text form
/// `console` prints.
pub mod core;
