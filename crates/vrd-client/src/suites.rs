//! Test suite and test case management.

use vrd_core::entities::{TestCase, TestSuite};
use vrd_core::wire::{CaseDraft, SuiteDraft};

use crate::http::{check_response, check_response_or, decode};
use crate::{ApiClient, ClientError, segment};

impl ApiClient {
    /// List all test suites with their cases.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn list_suites(&self) -> Result<Vec<TestSuite>, ClientError> {
        let resp = self.http.get(self.url("/test-suites")).send().await?;
        decode(check_response_or(resp, "Failed to fetch suites").await?).await
    }

    /// Look up one suite by id. Returns `None` if the backend does not list it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if listing suites fails.
    pub async fn find_suite(&self, suite_id: &str) -> Result<Option<TestSuite>, ClientError> {
        Ok(self
            .list_suites()
            .await?
            .into_iter()
            .find(|suite| suite.id == suite_id))
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn create_suite(&self, name: &str, description: &str) -> Result<TestSuite, ClientError> {
        let body = SuiteDraft { name, description };
        let resp = self.http.post(self.url("/test-suites")).json(&body).send().await?;
        decode(check_response_or(resp, "Failed create suite").await?).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn update_suite(
        &self,
        suite_id: &str,
        name: &str,
        description: &str,
    ) -> Result<TestSuite, ClientError> {
        let body = SuiteDraft { name, description };
        let url = self.url(&format!("/test-suites/{}", segment(suite_id)));
        let resp = self.http.put(url).json(&body).send().await?;
        decode(check_response(resp).await?).await
    }

    /// Delete a suite and, on the backend, all of its cases.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or non-success status.
    pub async fn delete_suite(&self, suite_id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/test-suites/{}", segment(suite_id)));
        check_response(self.http.delete(url).send().await?).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn create_case(
        &self,
        suite_id: &str,
        question: &str,
        expected_answer: &str,
    ) -> Result<TestCase, ClientError> {
        let body = CaseDraft {
            question,
            expected_answer,
        };
        let url = self.url(&format!("/test-suites/{}/cases", segment(suite_id)));
        let resp = self.http.post(url).json(&body).send().await?;
        decode(check_response_or(resp, "Failed to add test case").await?).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or an
    /// unparseable body.
    pub async fn update_case(
        &self,
        case_id: &str,
        question: &str,
        expected_answer: &str,
    ) -> Result<TestCase, ClientError> {
        let body = CaseDraft {
            question,
            expected_answer,
        };
        let url = self.url(&format!("/test-cases/{}", segment(case_id)));
        let resp = self.http.put(url).json(&body).send().await?;
        decode(check_response_or(resp, "Failed to update test case").await?).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or non-success status.
    pub async fn delete_case(&self, case_id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/test-cases/{}", segment(case_id)));
        check_response_or(self.http.delete(url).send().await?, "Failed to delete test case").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vrd_core::entities::TestSuite;

    const FIXTURE: &str = r#"[
        {
            "id": "suite-1",
            "name": "Arbeitsrecht",
            "description": "Kündigung und Fristen",
            "createdAt": "2025-01-05T12:00:00",
            "updatedAt": "2025-01-06T12:00:00",
            "testCases": [
                {"id": "c1", "question": "Frist?", "expectedAnswer": "3 Monate", "createdAt": "2025-01-05T12:01:00"},
                {"id": "c2", "question": "Probezeit?", "expectedAnswer": "1 Monat", "createdAt": "2025-01-05T12:02:00"}
            ]
        },
        {
            "id": "suite-2",
            "name": "Leer",
            "createdAt": "2025-01-07T12:00:00",
            "updatedAt": "2025-01-07T12:00:00"
        }
    ]"#;

    #[test]
    fn parse_suite_list() {
        let suites: Vec<TestSuite> = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(suites.len(), 2);
        assert_eq!(suites[0].test_cases.len(), 2);
        assert_eq!(suites[0].test_cases[1].expected_answer, "1 Monat");
        assert!(suites[1].test_cases.is_empty());
        assert!(suites[1].description.is_empty());
    }

    #[test]
    fn placeholders_follow_case_order() {
        let suites: Vec<TestSuite> = serde_json::from_str(FIXTURE).unwrap();
        let placeholders = suites[0].placeholder_results();
        assert_eq!(placeholders.len(), 2);
        assert_eq!(placeholders[0].test_case_id, "c1");
        assert!(!placeholders[1].passed.is_validated());
        assert!(placeholders[1].actual_answer.is_empty());
    }
}
