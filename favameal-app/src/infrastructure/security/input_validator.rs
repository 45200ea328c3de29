use favameal_errors::AppError;

const MAX_MEAL_NAME_LENGTH: usize = 55;
const MAX_RESTAURANT_NAME_LENGTH: usize = 100;
const MAX_ADDRESS_LENGTH: usize = 255;
const MAX_USERNAME_LENGTH: usize = 150;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub struct InputValidator;

impl InputValidator {
    pub fn meal_name(name: &str) -> Result<String, AppError> {
        Self::required_text("name", name, MAX_MEAL_NAME_LENGTH)
    }

    pub fn restaurant_name(name: &str) -> Result<String, AppError> {
        Self::required_text("name", name, MAX_RESTAURANT_NAME_LENGTH)
    }

    pub fn address(address: &str) -> Result<String, AppError> {
        Self::required_text("address", address, MAX_ADDRESS_LENGTH)
    }

    pub fn username(username: &str) -> Result<String, AppError> {
        let username = Self::required_text("username", username, MAX_USERNAME_LENGTH)?;
        let allowed =
            |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@' | '+');
        if !username.chars().all(allowed) {
            tracing::warn!(%username, "Rejected username with disallowed characters");
            return Err(AppError::Validation(
                "username may only contain letters, digits and @/./+/-/_".to_string(),
            ));
        }
        Ok(username)
    }

    pub fn rating(rating: i32) -> Result<i32, AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        Ok(rating)
    }

    fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, AppError> {
        let value = value.trim();

        if value.is_empty() {
            return Err(AppError::Validation(format!("{field} may not be blank")));
        }

        if value.chars().count() > max_len {
            return Err(AppError::Validation(format!(
                "{field} may not be longer than {max_len} characters"
            )));
        }

        Ok(value.to_string())
    }
}
