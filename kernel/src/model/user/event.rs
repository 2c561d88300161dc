use derive_new::new;

#[derive(new)]
pub struct CreateUser {
    pub user_name: String,
    pub password: String,
}
