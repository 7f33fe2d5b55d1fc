use crate::db::WriteSet;
use crate::error::WikiError;
use crate::server::extract::{CategoryPath, EntryPath};
use crate::server::router::WikiState;
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::Redirect,
};
use craftwiki_schema::{CategoryData, EntryData, InsertAck, RowCountAck};
use tracing::debug;

type FormFields = Result<Form<Vec<(String, String)>>, FormRejection>;

fn form_pairs(form: FormFields) -> Result<Vec<(String, String)>, WikiError> {
    form.map(|Form(pairs)| pairs)
        .map_err(|e| WikiError::Validation(e.body_text()))
}

/// GET /category/{category}
pub(super) async fn category_data(
    State(state): State<WikiState>,
    CategoryPath(category): CategoryPath,
) -> Result<Json<CategoryData>, WikiError> {
    let rows = state.db.read_all(category).await?;
    Ok(Json(CategoryData::ok(rows)))
}

/// GET /category/{category}/{id}
pub(super) async fn entry_data(
    State(state): State<WikiState>,
    EntryPath(category, id): EntryPath,
) -> Result<Json<EntryData>, WikiError> {
    let row = state.db.read_one(category, id).await?;
    Ok(Json(EntryData::ok(row)))
}

/// POST /upload/{category}
///
/// Form field names are the columns, in submission order.
pub(super) async fn upload_category_data(
    State(state): State<WikiState>,
    CategoryPath(category): CategoryPath,
    form: FormFields,
) -> Result<(StatusCode, Json<InsertAck>), WikiError> {
    let write = WriteSet::from_pairs(category, form_pairs(form)?)?;
    debug!(table = %write.category(), columns = ?write.columns(), "upload");

    let id = state.db.insert(write).await?;
    Ok((StatusCode::CREATED, Json(InsertAck::new(id))))
}

/// POST /edit/{category}/{id}
pub(super) async fn edit_category_data(
    State(state): State<WikiState>,
    EntryPath(category, id): EntryPath,
    form: FormFields,
) -> Result<Json<RowCountAck>, WikiError> {
    let write = WriteSet::from_pairs(category, form_pairs(form)?)?;
    debug!(table = %write.category(), id, columns = ?write.columns(), "edit");

    let rowcount = state.db.update(id, write).await?;
    Ok(Json(RowCountAck::new(rowcount)))
}

/// POST /delete/{category}/{id}
pub(super) async fn delete_category_data(
    State(state): State<WikiState>,
    EntryPath(category, id): EntryPath,
) -> Result<Json<RowCountAck>, WikiError> {
    let rowcount = state.db.delete(category, id).await?;
    Ok(Json(RowCountAck::new(rowcount)))
}

/// GET on the write routes sends the browser back to the wiki.
pub(super) async fn redirect_to_wiki() -> Redirect {
    Redirect::to("/wiki")
}
