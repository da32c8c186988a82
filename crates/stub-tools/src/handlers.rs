use serde_json::{json, Value};
use warp::Filter;

use relay::tools::jsonrpc::{
    ToolCallRequest, ToolCallResponse, INVALID_PARAMS, METHOD_NOT_FOUND, TOOLS_CALL_METHOD,
};
use relay::tools::storage::{UploadReceipt, RETRIEVE_TOOL, UPLOAD_TOOL};

use crate::store::FileStore;

pub fn routes(
    store: FileStore,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::post()
        .and(warp::path!("rest"))
        .and(warp::body::json())
        .map(move |request: ToolCallRequest| {
            let response = handle_call(&store, request);
            warp::reply::json(&response)
        })
}

fn string_arg<'a>(arguments: &'a Value, key: &str) -> Option<&'a str> {
    arguments.get(key).and_then(Value::as_str)
}

pub fn handle_call(store: &FileStore, request: ToolCallRequest) -> ToolCallResponse {
    let id = Value::String(request.id);

    if request.method != TOOLS_CALL_METHOD {
        tracing::warn!(method = %request.method, "unsupported method");
        return ToolCallResponse::failure(
            id,
            METHOD_NOT_FOUND,
            format!("method not found: {}", request.method),
        );
    }

    let arguments = &request.params.arguments;
    match request.params.name.as_str() {
        UPLOAD_TOOL => {
            let (Some(file), Some(name)) = (string_arg(arguments, "file"), string_arg(arguments, "name"))
            else {
                return ToolCallResponse::failure(id, INVALID_PARAMS, "upload needs `file` and `name`");
            };

            let cid = store.put(name, file);
            tracing::info!(%cid, name, bytes = file.len(), "stored upload");
            let receipt = serde_json::to_value(UploadReceipt::new(cid)).unwrap_or(Value::Null);
            ToolCallResponse::success(id, &receipt)
        }
        RETRIEVE_TOOL => {
            let Some(path) = string_arg(arguments, "filepath") else {
                return ToolCallResponse::failure(id, INVALID_PARAMS, "retrieve needs `filepath`");
            };

            match store.get(path) {
                Some(data) => {
                    tracing::info!(path, "served file");
                    ToolCallResponse::success(id, &json!({ "data": data }))
                }
                None => {
                    tracing::warn!(path, "file not found");
                    ToolCallResponse::success(id, &json!({}))
                }
            }
        }
        other => ToolCallResponse::failure(id, METHOD_NOT_FOUND, format!("unknown tool: {}", other)),
    }
}
