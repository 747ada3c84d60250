//! The `http` object: blocking GET and POST.

use std::collections::BTreeMap;

use hostlib_help::CapabilityRegistry;
use hostlib_http::{Header, HttpResponse};
use rhai::{Array, Dynamic};

use super::{document, error_object};
use crate::vm::ScriptVm;

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpObject;

const HELP: &[(&str, &[&str], &str)] = &[
    (
        "get",
        &["uri string", "headers []object"],
        "Performs a synchronous http GET and returns the response body. Headers are optional, e.g. [#{\"Accept\": \"text/plain\"}].",
    ),
    (
        "post",
        &["uri string", "contentType string", "payload string", "headers []object"],
        "Performs a synchronous http POST of payload and returns the response body. Headers are optional.",
    ),
];

pub fn install(vm: &mut ScriptVm, registry: &mut CapabilityRegistry) {
    let engine = vm.engine_mut();
    engine.register_type_with_name::<HttpObject>("HttpObject");

    engine.register_fn("get", |_: HttpObject, url: &str| -> Dynamic {
        body(hostlib_http::get(url, &[]), "get", url)
    });
    engine.register_fn("get", |_: HttpObject, url: &str, headers: Array| -> Dynamic {
        match translate_headers(headers) {
            Ok(headers) => body(hostlib_http::get(url, &headers), "get", url),
            Err(e) => error_object(format!("http.get({:?}, headers), {}", url, e)),
        }
    });

    engine.register_fn(
        "post",
        |_: HttpObject, url: &str, content_type: &str, payload: &str| -> Dynamic {
            body(
                hostlib_http::post(url, content_type, payload, &[]),
                "post",
                url,
            )
        },
    );
    engine.register_fn(
        "post",
        |_: HttpObject, url: &str, content_type: &str, payload: &str, headers: Array| -> Dynamic {
            match translate_headers(headers) {
                Ok(headers) => body(
                    hostlib_http::post(url, content_type, payload, &headers),
                    "post",
                    url,
                ),
                Err(e) => error_object(format!("http.post({:?}, headers), {}", url, e)),
            }
        },
    );

    vm.set_global("http", HttpObject);
    document(registry, "http", HELP);
}

/// Script header lists are arrays of `{name: value}` maps.
fn translate_headers(headers: Array) -> Result<Vec<Header>, hostlib_marshal::MarshalError> {
    let objects: Vec<BTreeMap<String, String>> =
        hostlib_marshal::to_struct(&Dynamic::from_array(headers))?;
    Ok(Header::from_objects(objects))
}

fn body(result: Result<HttpResponse, hostlib_http::Error>, function: &str, url: &str) -> Dynamic {
    match result {
        Ok(response) => Dynamic::from(response.body),
        Err(e) => error_object(format!("http.{}({:?}), {}", function, url, e)),
    }
}
