pub mod analysis;
pub mod category;
pub mod evaluation;
pub mod feature;
pub mod goal;
pub mod insights;
pub mod product;
pub mod profile;
pub mod recommendation;
