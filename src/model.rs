// Entity layer: typed views over the board service's JSON records.
//
// `Board` and `Column` own a per-instance cache of their children. A
// `list_*` call always performs a fresh remote read and fully replaces the
// cache (never merges), so remote deletions become visible on the next
// access. When the read fails the previous cache is left untouched and stays
// readable through the `columns`/`labels`/`cards` accessors.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::api::{self, ApiClient, ApiError};

#[derive(Debug, Deserialize)]
struct BoardRecord {
    id: String,
    name: String,
    desc: String,
    closed: bool,
}

#[derive(Debug, Deserialize)]
struct ColumnRecord {
    id: String,
    name: String,
    closed: bool,
}

#[derive(Debug, Deserialize)]
struct LabelRecord {
    id: String,
    name: String,
    color: String,
}

#[derive(Debug, Deserialize)]
struct CardRecord {
    id: String,
    name: String,
    desc: String,
    labels: Vec<CardLabelRecord>,
}

#[derive(Debug, Deserialize)]
struct CardLabelRecord {
    color: String,
}

fn parse_record<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::MalformedRecord(e.to_string()))
}

fn expect_array(payload: Option<Value>) -> Result<Vec<Value>, ApiError> {
    match payload {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(ApiError::MalformedRecord("expected a JSON array".into())),
    }
}

/// A label defined on a board. The name may be empty; the color is the tag
/// the service renders it with.
#[derive(Debug, Clone)]
pub struct Label {
    id: String,
    name: String,
    color: String,
}

impl Label {
    pub fn from_record(value: Value) -> Result<Self, ApiError> {
        let record: LabelRecord = parse_record(value)?;
        Ok(Label {
            id: record.id,
            name: record.name,
            color: record.color,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label Name: {}\n   Label Color: {}", self.name, self.color)
    }
}

/// Reference to a label at the card-creation boundary: either a raw identity
/// from the service or a resolved `Label` entity.
#[derive(Debug, Clone)]
pub enum LabelRef {
    ById(String),
    Resolved(Label),
}

impl LabelRef {
    pub fn id(&self) -> &str {
        match self {
            LabelRef::ById(id) => id,
            LabelRef::Resolved(label) => label.id(),
        }
    }
}

/// An existing card in a column. The label colors are a projection captured
/// at fetch time, not live references to `Label` entities.
#[derive(Debug, Clone)]
pub struct Card {
    id: String,
    name: String,
    desc: String,
    label_colors: Vec<String>,
}

impl Card {
    pub fn from_record(value: Value) -> Result<Self, ApiError> {
        let record: CardRecord = parse_record(value)?;
        Ok(Card {
            id: record.id,
            name: record.name,
            desc: record.desc,
            label_colors: record.labels.into_iter().map(|l| l.color).collect(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Card Name: {} -- With Labels {}",
            self.name,
            self.label_colors.join(", ")
        )
    }
}

/// The not-yet-sent card assembled during composition. Label attachment is
/// idempotent by label id, so selecting the same label twice keeps the set
/// unchanged.
#[derive(Debug, Clone)]
pub struct CardDraft {
    pub name: String,
    pub desc: String,
    labels: Vec<LabelRef>,
}

impl CardDraft {
    pub fn new(name: String, desc: String) -> Self {
        CardDraft {
            name,
            desc,
            labels: Vec::new(),
        }
    }

    pub fn attach(&mut self, label: LabelRef) {
        if !self.labels.iter().any(|l| l.id() == label.id()) {
            self.labels.push(label);
        }
    }

    pub fn labels(&self) -> &[LabelRef] {
        &self.labels
    }

    /// Comma-joined label ids, the shape the create endpoint expects.
    pub fn label_ids(&self) -> String {
        self.labels
            .iter()
            .map(LabelRef::id)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A column ("list") of a board. Keeps its own client handle for fetching
/// and a cache of its cards.
#[derive(Debug, Clone)]
pub struct Column {
    api: ApiClient,
    id: String,
    name: String,
    closed: bool,
    cards: Vec<Card>,
}

impl Column {
    pub fn from_record(value: Value, api: &ApiClient) -> Result<Self, ApiError> {
        let record: ColumnRecord = parse_record(value)?;
        Ok(Column {
            api: api.clone(),
            id: record.id,
            name: record.name,
            closed: record.closed,
            cards: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fetch the current cards of this column, replacing the cache, and
    /// return them in service order. On failure the cache is untouched.
    pub fn list_cards(&mut self) -> Result<&[Card], ApiError> {
        let payload = self.api.get(&api::cards_path(&self.id), &[])?;
        let mut fresh: Vec<Card> = Vec::new();
        for record in expect_array(payload)? {
            let card = Card::from_record(record)?;
            if !fresh.iter().any(|c| c.id() == card.id()) {
                fresh.push(card);
            }
        }
        self.cards = fresh;
        Ok(&self.cards)
    }

    /// The cards from the last successful refresh (empty if none yet).
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Create a card on this column. The local card cache is not updated;
    /// callers re-list to observe the new card.
    pub fn create_card(&self, draft: &CardDraft) -> Result<(), ApiError> {
        let params = [
            ("name", draft.name.clone()),
            ("desc", draft.desc.clone()),
            ("idList", self.id.clone()),
            ("idLabels", draft.label_ids()),
        ];
        self.api.post(api::ADD_CARD_PATH, &params)?;
        Ok(())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column Name: {}\n   Status: {}",
            self.name,
            status_word(self.closed)
        )
    }
}

/// A board of the authenticated member, with lazily fetched column and label
/// caches.
#[derive(Debug, Clone)]
pub struct Board {
    api: ApiClient,
    id: String,
    name: String,
    desc: String,
    closed: bool,
    columns: Vec<Column>,
    labels: Vec<Label>,
}

impl Board {
    pub fn from_record(value: Value, api: &ApiClient) -> Result<Self, ApiError> {
        let record: BoardRecord = parse_record(value)?;
        Ok(Board {
            api: api.clone(),
            id: record.id,
            name: record.name,
            desc: record.desc,
            closed: record.closed,
            columns: Vec::new(),
            labels: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fetch the current columns of this board, replacing the cache, and
    /// return them in service order. Duplicate ids within one response are
    /// collapsed. On failure the cache is untouched.
    pub fn list_columns(&mut self) -> Result<&[Column], ApiError> {
        let payload = self.api.get(&api::lists_path(&self.id), &[])?;
        let mut fresh: Vec<Column> = Vec::new();
        for record in expect_array(payload)? {
            let column = Column::from_record(record, &self.api)?;
            if !fresh.iter().any(|c| c.id() == column.id()) {
                fresh.push(column);
            }
        }
        self.columns = fresh;
        Ok(&self.columns)
    }

    /// The columns from the last successful refresh (empty if none yet).
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Fetch the current labels of this board, replacing the cache, and
    /// return them in service order. On failure the cache is untouched.
    pub fn list_labels(&mut self) -> Result<&[Label], ApiError> {
        let payload = self.api.get(&api::labels_path(&self.id), &[])?;
        let mut fresh: Vec<Label> = Vec::new();
        for record in expect_array(payload)? {
            let label = Label::from_record(record)?;
            if !fresh.iter().any(|l| l.id() == label.id()) {
                fresh.push(label);
            }
        }
        self.labels = fresh;
        Ok(&self.labels)
    }

    /// The labels from the last successful refresh (empty if none yet).
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board Name: {}\n   Description: {}\n   Status: {}",
            self.name,
            self.desc,
            status_word(self.closed)
        )
    }
}

fn status_word(closed: bool) -> &'static str {
    if closed {
        "Closed"
    } else {
        "Active"
    }
}

/// Fetch all boards of the authenticated member, in service order.
pub fn fetch_boards(api: &ApiClient) -> Result<Vec<Board>, ApiError> {
    let payload = api.get(api::BOARDS_PATH, &[])?;
    expect_array(payload)?
        .into_iter()
        .map(|record| Board::from_record(record, api))
        .collect()
}
