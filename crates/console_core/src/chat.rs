use crate::progress::StageProgress;
use crate::RequestId;

pub(crate) const CHAT_GREETING: &str = "Hello! I can answer questions about the 28 historical SOCAR documents. What would you like to know?";

pub(crate) const CHAT_INITIAL_LABEL: &str = "Initializing AI systems...";

pub(crate) const CHAT_STAGES: &[&str] = &[
    "🔍 Searching 1,128 vectors across 28 historical documents...",
    "🧠 Embedding your question with BAAI/bge-large-en-v1.5...",
    "📊 Retrieving top-3 most relevant document chunks...",
    "🤖 Generating answer with Llama-4-Maverick-17B...",
    "📝 Adding citations from source documents...",
    "✨ Finalizing response...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub document_name: String,
    pub page_number: u32,
}

impl SourceRef {
    /// Citation text, e.g. `doc1.pdf - Page 3`.
    pub fn citation(&self) -> String {
        format!("{} - Page {}", self.document_name, self.page_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub answer_text: String,
    pub sources: Vec<SourceRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MessageContent {
    Greeting,
    Question(String),
    Answer(AnswerResult),
    Error(String),
    Loading {
        request_id: RequestId,
        progress: StageProgress,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChatMessage {
    pub(crate) role: Role,
    pub(crate) content: MessageContent,
}

impl ChatMessage {
    fn bot(content: MessageContent) -> Self {
        Self {
            role: Role::Bot,
            content,
        }
    }
}

/// Transcript plus the question box. The transcript only ever grows, except
/// for the single loading message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ChatPanel {
    pub(crate) transcript: Vec<ChatMessage>,
    pub(crate) input: String,
}

impl ChatPanel {
    pub(crate) fn reset(&mut self) {
        self.transcript = vec![ChatMessage::bot(MessageContent::Greeting)];
        self.input.clear();
    }

    pub(crate) fn push_question(&mut self, question: String) {
        self.transcript.push(ChatMessage {
            role: Role::User,
            content: MessageContent::Question(question),
        });
    }

    pub(crate) fn push_loading(&mut self, request_id: RequestId) {
        self.transcript.push(ChatMessage::bot(MessageContent::Loading {
            request_id,
            progress: StageProgress::pending(CHAT_STAGES, CHAT_INITIAL_LABEL),
        }));
    }

    fn loading_position(&self) -> Option<usize> {
        self.transcript
            .iter()
            .position(|msg| matches!(msg.content, MessageContent::Loading { .. }))
    }

    pub(crate) fn progress_for(&mut self, request_id: RequestId) -> Option<&mut StageProgress> {
        self.transcript.iter_mut().find_map(|msg| match &mut msg.content {
            MessageContent::Loading {
                request_id: active,
                progress,
            } if *active == request_id => Some(progress),
            _ => None,
        })
    }

    /// Removes the loading message if it belongs to `request_id`.
    /// Returns false when the request is no longer the one being waited on.
    pub(crate) fn take_loading(&mut self, request_id: RequestId) -> bool {
        let Some(pos) = self.loading_position() else {
            return false;
        };
        let owned = matches!(
            self.transcript[pos].content,
            MessageContent::Loading { request_id: active, .. } if active == request_id
        );
        if !owned {
            return false;
        }
        self.transcript.remove(pos);
        true
    }

    /// Drops whatever loading message is present, orphaning its request.
    pub(crate) fn detach(&mut self) -> Option<RequestId> {
        let pos = self.loading_position()?;
        match self.transcript.remove(pos).content {
            MessageContent::Loading { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    pub(crate) fn push_answer(&mut self, answer: AnswerResult) {
        self.transcript
            .push(ChatMessage::bot(MessageContent::Answer(answer)));
    }

    pub(crate) fn push_error(&mut self, message: String) {
        self.transcript
            .push(ChatMessage::bot(MessageContent::Error(message)));
    }
}
