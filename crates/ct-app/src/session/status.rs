use ct_core::{PreferenceError, SessionStatus, User};
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};

enum Update {
    Flag(bool),
    User(Option<User>),
}

/// Combine the login flag and cached user streams into one status stream.
///
/// Nothing is emitted until both sources have produced a value; after that
/// every update from either side yields a fresh status. Errors from either
/// source pass through without resetting the last known values.
pub fn merge_status(
    flag: BoxStream<'static, Result<bool, PreferenceError>>,
    user: BoxStream<'static, Result<Option<User>, PreferenceError>>,
) -> BoxStream<'static, Result<SessionStatus, PreferenceError>> {
    let flag = flag.map(|item| item.map(Update::Flag));
    let user = user.map(|item| item.map(Update::User));

    stream::select(flag, user)
        .scan(
            (None::<bool>, None::<Option<User>>),
            |(last_flag, last_user), update| {
                let out = match update {
                    Err(err) => Some(Err(err)),
                    Ok(update) => {
                        match update {
                            Update::Flag(value) => *last_flag = Some(value),
                            Update::User(value) => *last_user = Some(value),
                        }
                        match (&*last_flag, &*last_user) {
                            (Some(flag), Some(user)) => {
                                Some(Ok(SessionStatus::resolve(*flag, user.clone())))
                            }
                            _ => None,
                        }
                    }
                };
                future::ready(Some(out))
            },
        )
        .filter_map(future::ready)
        .boxed()
}
