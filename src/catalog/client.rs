use log::debug;
use serde::Serialize;

use super::book::{Book, BookId};
use super::error::{decode_outcome, ApiError};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BorrowRequest {
    pub book_id: BookId,
    pub borrower_email: String,
    pub start_date: String,
    pub return_date: String,
}

impl BorrowRequest {
    pub fn new(book_id: BookId, borrower_email: String, start_date: String) -> BorrowRequest {
        // The due-date form never shipped, but the backend still expects a
        // return date up front; it mirrors the start date for now.
        let return_date = start_date.clone();
        BorrowRequest {
            book_id,
            borrower_email,
            start_date,
            return_date,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ReturnRequest {
    pub book_id: BookId,
    pub return_date: String,
}

#[derive(Serialize)]
struct Empty {}

pub struct LibraryClient {
    http: reqwest::Client,
    base: String,
}

impl LibraryClient {
    pub fn new(base: impl Into<String>) -> LibraryClient {
        let base = base.into().trim_end_matches('/').to_owned();
        LibraryClient {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub async fn books(&self) -> Result<Vec<Book>, ApiError> {
        let route = format!("{}/books", self.base);
        debug!("GET {}", route);

        let books = self
            .http
            .get(&route)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Book>>()
            .await?;

        debug!("loaded {} books", books.len());
        Ok(books)
    }

    pub async fn borrow(&self, request: &BorrowRequest) -> Result<String, ApiError> {
        self.post("/borrow", request).await
    }

    pub async fn return_book(&self, request: &ReturnRequest) -> Result<String, ApiError> {
        self.post("/return", request).await
    }

    pub async fn clear_borrowings(&self) -> Result<String, ApiError> {
        // The clear route wants a JSON object, not an empty payload.
        self.post("/clear-borrowings", &Empty {}).await
    }

    async fn post<T>(&self, path: &str, body: &T) -> Result<String, ApiError>
    where
        T: Serialize,
    {
        let route = format!("{}{}", self.base, path);
        debug!("POST {}", route);

        let response = self.http.post(&route).json(body).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} from {}", status, route);

        decode_outcome(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn borrow_request_mirrors_start_date() {
        let request = BorrowRequest::new(
            BookId::Number(1),
            "a@b.com".to_owned(),
            "2024-01-01".to_owned(),
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "book_id": 1,
                "borrower_email": "a@b.com",
                "start_date": "2024-01-01",
                "return_date": "2024-01-01",
            })
        );
    }

    #[test]
    fn return_request_carries_both_fields() {
        let request = ReturnRequest {
            book_id: BookId::Text("inv-7".to_owned()),
            return_date: "2024-02-02".to_owned(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"book_id": "inv-7", "return_date": "2024-02-02"})
        );
    }

    #[test]
    fn clear_body_is_an_empty_object() {
        assert_eq!(serde_json::to_string(&Empty {}).unwrap(), "{}");
    }

    #[test]
    fn base_url_tolerates_a_trailing_slash() {
        let client = LibraryClient::new("http://localhost:5000/");
        assert_eq!(client.base, "http://localhost:5000");
    }
}
