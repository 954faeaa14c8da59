use serde::Deserialize;

/// Profile of a user, fetched directly or through group/room membership.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserProfileResponse {
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "pictureUrl")]
    pub picture_url: Option<String>,
    #[serde(rename = "statusMessage")]
    pub status_message: Option<String>,
}

/// One page of member ids. `next` is the opaque continuation token for the
/// following page; absent on the last page.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MembersIdsResponse {
    #[serde(rename = "memberIds")]
    pub member_ids: Vec<String>,
    pub next: Option<String>,
}
