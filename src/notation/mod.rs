pub(crate) mod hints;
pub(crate) mod normalize;
pub(crate) mod parser;
