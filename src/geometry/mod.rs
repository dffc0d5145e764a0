pub(crate) mod round;
pub(crate) mod stitch;
pub(crate) mod yarn;
