use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};
use cloudls_core::error::Error;

/// Classifies an SDK failure. The same `SdkError` type is shared by every
/// service crate, so this covers EC2, ELBv2 and Auto Scaling alike.
pub fn map_aws_error<E>(operation_name: &'static str, sdk_error: SdkError<E>) -> Error
where
    E: std::error::Error + Send + Sync + 'static + ProvideErrorMetadata,
{
    match sdk_error {
        SdkError::ServiceError(service_error) => {
            let error = service_error.into_err();
            let code_string = error.code().unwrap_or_default();
            let message_string = error.message().unwrap_or_default().to_string();

            match code_string {
                "AuthFailure" | "InvalidClientTokenId" | "ExpiredToken" => Error::Authentication,
                "UnauthorizedOperation" | "AccessDenied" | "AccessDeniedException" => {
                    Error::Authorization {
                        operation: operation_name.to_string(),
                    }
                }
                "Throttling" | "ThrottlingException" | "RequestLimitExceeded" => Error::Quota,
                _ => Error::Unknown {
                    operation_name: operation_name.to_string(),
                    detail: if message_string.is_empty() {
                        code_string.to_string()
                    } else {
                        message_string
                    },
                },
            }
        }

        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => Error::Transient {
            operation_name: operation_name.to_string(),
        },

        other => Error::Unknown {
            operation_name: operation_name.to_string(),
            detail: other.to_string(),
        },
    }
}
