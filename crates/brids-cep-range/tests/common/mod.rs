//! Scripted upstream for driving `CorreiosRangeSource` without a network.

#![allow(dead_code)]

use brids_cep_range::{RangeError, Result, Transport};
use std::collections::VecDeque;

pub const ROOT: &str = "https://correios.test";

/// One request seen by the scripted transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get(String),
    Post(String, Vec<(String, String)>),
}

impl Request {
    pub fn form_value(&self, name: &str) -> Option<&str> {
        match self {
            Request::Post(_, form) => form
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            Request::Get(_) => None,
        }
    }
}

/// Transport answering from queues of canned pages and recording every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    gets: VecDeque<Result<String>>,
    posts: VecDeque<Result<String>>,
    pub requests: Vec<Request>,
    pub closed: bool,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_states(states: &[&str]) -> Self {
        let mut transport = Self::new();
        transport.push_get(states_page(states));
        transport
    }

    pub fn push_get(&mut self, html: impl Into<String>) {
        self.gets.push_back(Ok(html.into()));
    }

    pub fn push_post(&mut self, html: impl Into<String>) {
        self.posts.push_back(Ok(html.into()));
    }

    pub fn push_post_error(&mut self, err: RangeError) {
        self.posts.push_back(Err(err));
    }

    pub fn post_count(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| matches!(r, Request::Post(..)))
            .count()
    }

    pub fn posts(&self) -> Vec<&Request> {
        self.requests
            .iter()
            .filter(|r| matches!(r, Request::Post(..)))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn get(&mut self, url: &str) -> Result<String> {
        if self.closed {
            return Err(RangeError::ClientClosed);
        }
        self.requests.push(Request::Get(url.to_string()));
        self.gets.pop_front().unwrap_or_else(|| {
            Err(RangeError::Request {
                url: url.to_string(),
                reason: "no scripted GET response left".to_string(),
            })
        })
    }

    fn post_form(&mut self, url: &str, form: &[(&str, String)]) -> Result<String> {
        if self.closed {
            return Err(RangeError::ClientClosed);
        }
        let form = form
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect();
        self.requests.push(Request::Post(url.to_string(), form));
        self.posts.pop_front().unwrap_or_else(|| {
            Err(RangeError::Request {
                url: url.to_string(),
                reason: "no scripted POST response left".to_string(),
            })
        })
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// State selector page offering `states`.
pub fn states_page(states: &[&str]) -> String {
    let options: String = states
        .iter()
        .map(|uf| format!(r#"<option value="{uf}">{uf}</option>"#))
        .collect();

    format!(
        r#"<html><body><form name="Geral" method="post" action="resultadoBuscaFaixaCEP.cfm">
        <select name="UF" class="f1col"><option value=""></option>{options}</select>
        </form></body></html>"#
    )
}

/// Result row: location, range, status, range type.
pub fn row(location: &str, low: &str, high: &str, label: &str) -> String {
    format!(
        "<tr><td>{location}</td><td>{low} a {high}</td><td>Codificado por logradouros</td><td>{label}</td></tr>"
    )
}

pub fn total_row(location: &str, low: &str, high: &str) -> String {
    row(location, low, high, "Total do município")
}

/// Result page with `rows` in a data table and an optional "Proxima" form
/// pointing at rows `start..=end`.
pub fn range_page(rows: &[String], next: Option<(u32, u32)>) -> String {
    let form = next
        .map(|(start, end)| {
            format!(
                r#"<form name="Proxima" method="post" action="resultadoBuscaFaixaCEP.cfm">
                <input type="hidden" name="UF" value="">
                <input type="hidden" name="Localidade" value="">
                <input type="hidden" name="Bairro" value="">
                <input type="hidden" name="qtdrow" value="50">
                <input type="hidden" name="pagini" value="{start}">
                <input type="hidden" name="pagfim" value="{end}">
                </form>"#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<html><body>
        <table class="tmptabela" style="margin-top: 5px">
          <tr><td>UF</td><td>Faixa de CEP</td><td></td><td></td></tr>
        </table>
        <table class="tmptabela">
          <tr><th>Localidade</th><th>Faixa de CEP</th><th>Situação</th><th>Tipo de Faixa</th></tr>
          {rows}
        </table>
        {form}
        </body></html>"#,
        rows = rows.concat()
    )
}

pub fn df_page() -> String {
    range_page(
        &[
            total_row("Brasília", "70000-001", "72799-999"),
            row("Brasília", "70000-001", "70999-999", "Exclusiva da sede urbana"),
            total_row("Brasília", "73000-001", "73699-999"),
        ],
        None,
    )
}
