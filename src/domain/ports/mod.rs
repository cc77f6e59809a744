mod nutrition_api_port;

pub use nutrition_api_port::NutritionApiPort;

#[cfg(test)]
pub mod mocks {
    pub use super::nutrition_api_port::mock::{Endpoint, MockNutritionApi};
}
