use crate::application::error::{AppError, AppResult};
use crate::application::ports::identity_provider::{IdentityError, IdentityProvider};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{User, normalize_email, validate_name};

pub struct SignUp<'a, R, I>
where
    R: UserRepository + ?Sized,
    I: IdentityProvider + ?Sized,
{
    pub users: &'a R,
    pub identity: &'a I,
}

#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl<'a, R, I> SignUp<'a, R, I>
where
    R: UserRepository + ?Sized,
    I: IdentityProvider + ?Sized,
{
    pub async fn execute(&self, req: &SignUpRequest) -> AppResult<User> {
        let name = validate_name(&req.name)?;
        let email = normalize_email(&req.email)?;
        if req.password.is_empty() {
            return Err(AppError::Validation("password is required".into()));
        }
        if self.users.exists_email(&email).await? {
            return Err(AppError::Conflict("email already registered".into()));
        }
        self.identity
            .sign_up(&name, &email, &req.password)
            .await
            .map_err(|err| match err {
                IdentityError::Rejected { code, message } => match code.as_str() {
                    "UsernameExistsException" => {
                        AppError::Conflict("email already registered".into())
                    }
                    "InvalidPasswordException" | "InvalidParameterException" => {
                        AppError::Validation(message)
                    }
                    _ => AppError::IdentityProvider(message),
                },
                other => {
                    tracing::error!(error = ?other, "identity_sign_up_failed");
                    other.into()
                }
            })?;
        let user = self.users.create(&name, &email).await.map_err(|err| {
            tracing::error!(error = ?err, email = %email, "create_user_failed");
            err
        })?;
        Ok(user)
    }
}
