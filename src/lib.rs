/*!
# User Report

A small web application that serves a user directory as a server-driven UI
and exports it as an XLSX report.

## Overview

Pages are not HTML. Each API route returns a JSON tree of typed components
(headings, tables, links, text, code, details) which a prebuilt frontend
bundle renders in the browser. Every other path serves the HTML shell that
loads that bundle.

## Architecture

### Data
- **record**: scalar values, declared schemas and ordered records
- **user**: the `User` entity and its column layout
- **repository**: `UserStore`, the in-memory data set handed to handlers.
  Fixed after startup, replaced only through an explicit reload.

### Export
- **exporter**: records to a single-sheet workbook. Header row of field
  names, one row per record. Records that do not match the header are
  rejected, or written positionally when asked to.

### Pages
- **ui**: component tree and the page builders

### Web (feature `web`)
- **shell**: HTML shell rendered from a handlebars template
- **app**: routing, handlers and request logging
- **config**: command line and environment settings

## REST API Endpoints

- `/api/` - Users page
- `/api/user/{id}/` - Profile page for one user
- `/excel` - Download `report.xlsx`
- anything else - HTML shell
*/

pub mod error;
pub mod exporter;
pub mod record;
pub mod repository;
pub mod ui;
pub mod user;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod config;
#[cfg(feature = "web")]
pub mod shell;

pub use error::{ExportError, StoreError};
#[cfg(feature = "web")]
pub use error::AppError;
pub use exporter::{Exporter, SchemaPolicy, export_rows};
pub use record::{FieldDef, FieldKind, Record, Schema, Tabular, Value};
pub use repository::UserStore;
pub use user::User;
