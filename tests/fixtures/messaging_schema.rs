//! Messaging API schema.

/// An inline image attachment.
#[derive(Object)]
struct Image {
    url: String,
    width: Int,
    height: Int,
}

/// Plain text content.
#[derive(Object)]
struct PlainText {
    content: String,
}

mod Message {
    /// A thumbnail-sized preview image.
    #[derive(Object)]
    struct Image {
        url: String,
    }

    /// What a message carries.
    #[derive(OneOf)]
    enum Body {
        Text(PlainText),
        Picture(Image),
    }
}

/// A chat message.
#[derive(Object)]
struct Message {
    /// Unique identifier.
    messageId: String,
    sender: String,
    body: Body,
    thumbnail: Option<Image>,
}

/// Lists messages in a channel.
#[endpoint(method = "get", path = "/v1/messages")]
mod ListMessages {
    #[derive(Object)]
    struct Header {
        authToken: String,
    }

    #[derive(Object)]
    struct Query {
        /// Upper bound on returned messages.
        #[schema(default = 20)]
        pageSize: Option<Int>,
        cursor: Option<String>,
    }

    #[derive(Object)]
    struct Body {}

    #[derive(Object)]
    struct Response {
        messages: Vec<Message>,
        hasMore: Bool,
    }
}

/// Sends a message to a channel.
#[endpoint(method = "post", path = "/v1/messages")]
mod SendMessage {
    #[derive(Object)]
    struct Header {
        authToken: String,
    }

    #[derive(Object)]
    struct Query {}

    #[derive(Object)]
    struct Body {
        channelId: String,
        message: Message,
    }

    #[derive(Object)]
    struct Response {
        message: Message,
    }
}
