//! Terminal front end: read a question per line, print the answer region.

use std::io::{BufRead, Write};

use crate::core::controller::{QueryFormController, SubmitEvent};
use crate::core::page::{MemoryPage, Region};
use crate::core::query_client::QueryTransport;

pub const PROMPT: &str = "Enter line: ";

/// Run until `input` is exhausted, printing one answer per line.
pub async fn run<T, R, W>(
    controller: &mut QueryFormController<MemoryPage, T>,
    mut input: R,
    output: &mut W,
) -> anyhow::Result<()>
where
    T: QueryTransport,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "Bye!")?;
            return Ok(());
        }

        let question = line.trim_end_matches(['\r', '\n']);
        controller.submit(&mut SubmitEvent::new(question)).await;

        let answer = controller.page().text(Region::Answer).unwrap_or_default();
        writeln!(output, "{answer}")?;
        controller.page_mut().clear_ops();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payload::{QueryEnvelope, ResponsePayload};
    use crate::core::query_client::RequestFailure;
    use serde_json::Value;

    struct EchoTransport;

    impl QueryTransport for EchoTransport {
        async fn post_query(&self, query: &str) -> Result<QueryEnvelope, RequestFailure> {
            if query.is_empty() {
                return Err(RequestFailure::Status {
                    status: 400,
                    body: "empty question".to_string(),
                });
            }
            Ok(QueryEnvelope {
                data: ResponsePayload {
                    plain: query.to_uppercase(),
                    query: query.to_string(),
                    params: Value::Null,
                    tree: String::new(),
                    sparql_query: String::new(),
                },
            })
        }
    }

    #[tokio::test]
    async fn test_repl_prints_answers_until_eof() {
        let mut controller = QueryFormController::new(MemoryPage::new(), EchoTransport);
        let input = "who is obama?\n\n".as_bytes();
        let mut output = Vec::new();

        run(&mut controller, input, &mut output).await.unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(
            printed,
            "Enter line: WHO IS OBAMA?\nEnter line: empty question\nEnter line: Bye!\n"
        );
        assert!(controller.page().ops().is_empty());
    }

    #[tokio::test]
    async fn test_repl_prints_answer_text_verbatim() {
        let mut controller = QueryFormController::new(MemoryPage::new(), EchoTransport);
        let input = "filter(?n < 5) & <b>\n".as_bytes();
        let mut output = Vec::new();

        run(&mut controller, input, &mut output).await.unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed, "Enter line: FILTER(?N < 5) & <B>\nEnter line: Bye!\n");
    }
}
