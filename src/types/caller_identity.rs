use serde::Serialize;

use crate::error::IdentityError;

#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CallerIdentity {
    pub account: String,
    pub user_id: String,
    pub arn: String,
}

fn require(value: Option<String>, field: &'static str) -> Result<String, IdentityError> {
    value.ok_or(IdentityError::MissingField(field))
}

impl TryFrom<aws_sdk_sts::operation::get_caller_identity::GetCallerIdentityOutput>
    for CallerIdentity
{
    type Error = IdentityError;

    fn try_from(
        output: aws_sdk_sts::operation::get_caller_identity::GetCallerIdentityOutput,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            account: require(output.account, "account")?,
            user_id: require(output.user_id, "user_id")?,
            arn: require(output.arn, "arn")?,
        })
    }
}

impl TryFrom<rusoto_sts::GetCallerIdentityResponse> for CallerIdentity {
    type Error = IdentityError;

    fn try_from(response: rusoto_sts::GetCallerIdentityResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            account: require(response.account, "account")?,
            user_id: require(response.user_id, "user_id")?,
            arn: require(response.arn, "arn")?,
        })
    }
}
