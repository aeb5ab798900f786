//! Use case for searching inside the open conversation. The query goes
//! out over the hub; results come back asynchronously as a hub event.

use crate::domain::ids::ConversationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCommand {
    pub conversation: Option<ConversationId>,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSourceError {
    NotConnected,
    ChannelClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Query is empty after trimming; the caller clears results instead
    /// of dispatching.
    EmptyQuery,
    /// Nothing is open to search in; the caller shows a prompt.
    NoConversationOpen,
    NotConnected,
    ChannelClosed,
}

pub trait SearchInvoker {
    fn invoke_search(
        &self,
        conversation: ConversationId,
        query: &str,
    ) -> Result<(), SearchSourceError>;
}

impl<T: SearchInvoker + ?Sized> SearchInvoker for &T {
    fn invoke_search(
        &self,
        conversation: ConversationId,
        query: &str,
    ) -> Result<(), SearchSourceError> {
        (*self).invoke_search(conversation, query)
    }
}

pub fn search_messages(
    invoker: &dyn SearchInvoker,
    command: SearchCommand,
) -> Result<(), SearchError> {
    let query = command.query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let conversation = command
        .conversation
        .ok_or(SearchError::NoConversationOpen)?;

    invoker
        .invoke_search(conversation, query)
        .map_err(map_source_error)
}

fn map_source_error(error: SearchSourceError) -> SearchError {
    match error {
        SearchSourceError::NotConnected => SearchError::NotConnected,
        SearchSourceError::ChannelClosed => SearchError::ChannelClosed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::domain::ids::UserId;

    struct StubInvoker {
        result: Result<(), SearchSourceError>,
        captured: RefCell<Option<(ConversationId, String)>>,
    }

    impl StubInvoker {
        fn with_result(result: Result<(), SearchSourceError>) -> Self {
            Self {
                result,
                captured: RefCell::new(None),
            }
        }
    }

    impl SearchInvoker for StubInvoker {
        fn invoke_search(
            &self,
            conversation: ConversationId,
            query: &str,
        ) -> Result<(), SearchSourceError> {
            *self.captured.borrow_mut() = Some((conversation, query.to_owned()));
            self.result.clone()
        }
    }

    #[test]
    fn empty_query_never_reaches_the_hub() {
        let invoker = StubInvoker::with_result(Ok(()));

        let result = search_messages(
            &invoker,
            SearchCommand {
                conversation: Some(ConversationId::Friend(UserId(42))),
                query: "   ".to_owned(),
            },
        );

        assert_eq!(result, Err(SearchError::EmptyQuery));
        assert!(invoker.captured.borrow().is_none());
    }

    #[test]
    fn needs_an_open_conversation() {
        let invoker = StubInvoker::with_result(Ok(()));

        let result = search_messages(
            &invoker,
            SearchCommand {
                conversation: None,
                query: "bóng đá".to_owned(),
            },
        );

        assert_eq!(result, Err(SearchError::NoConversationOpen));
        assert!(invoker.captured.borrow().is_none());
    }

    #[test]
    fn dispatches_the_trimmed_query() {
        let invoker = StubInvoker::with_result(Ok(()));

        let result = search_messages(
            &invoker,
            SearchCommand {
                conversation: Some(ConversationId::Friend(UserId(42))),
                query: " bóng đá ".to_owned(),
            },
        );

        assert_eq!(result, Ok(()));
        assert_eq!(
            *invoker.captured.borrow(),
            Some((ConversationId::Friend(UserId(42)), "bóng đá".to_owned()))
        );
    }

    #[test]
    fn maps_source_errors() {
        let invoker = StubInvoker::with_result(Err(SearchSourceError::NotConnected));

        let result = search_messages(
            &invoker,
            SearchCommand {
                conversation: Some(ConversationId::Friend(UserId(42))),
                query: "bóng".to_owned(),
            },
        );

        assert_eq!(result, Err(SearchError::NotConnected));
    }
}
