#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Error {
    IncorrectData {
        with: &'static str,
    },
    AlreadyInUse {
        with: &'static str,
    },
    DatabaseError {
        operation: &'static str,
        with: &'static str,
    },
    InternalError,

    RenderFail,
    MissingHeaders,

    UnknownUser,

    EmailFailed,
    UploadFailed,
    InvalidToken,
    InvalidCredentials,
    InvalidOrExpiredCode,
    ResetNotVerified,

    ShortPassword,
    WeakPassword {
        missing: &'static str,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
pub type Success = Result<()>;
