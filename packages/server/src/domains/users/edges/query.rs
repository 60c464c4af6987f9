use juniper::FieldResult;

use crate::domains::users::data::UserData;
use crate::server::graphql::GraphQLContext;

/// The caller's own profile
pub async fn get_current_user(ctx: &GraphQLContext) -> FieldResult<UserData> {
    let user = ctx.current_user().await?;
    Ok(UserData::from(user))
}
