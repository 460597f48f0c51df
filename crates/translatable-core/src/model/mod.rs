mod class;
mod translation;

pub use class::TranslatableClassModel;
pub use translation::TranslationModel;
