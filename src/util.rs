/// Source position helpers.
///
/// Maps byte offsets produced by the lexer back to human readable
/// `[line:column]` positions for diagnostics. Nothing in the pipeline needs
/// positions for anything but error messages, so the map is built once per
/// run and shared by reference.
pub mod source_map;
