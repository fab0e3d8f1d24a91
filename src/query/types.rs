/// Columns an article listing may be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    Title,
    Topic,
    Author,
    #[default]
    CreatedAt,
    Votes,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Title,
        SortColumn::Topic,
        SortColumn::Author,
        SortColumn::CreatedAt,
        SortColumn::Votes,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            SortColumn::Title => "title",
            SortColumn::Topic => "topic",
            SortColumn::Author => "author",
            SortColumn::CreatedAt => "created_at",
            SortColumn::Votes => "votes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.column_name() == value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn to_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }
}
