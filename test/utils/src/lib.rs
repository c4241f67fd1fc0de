pub fn ollama_stream_fixture() -> &'static str {
    return r#"
{"model":"llama2","response":"Hello ","done":false}
{"model":"llama2","response":"World","done":false}

{"model":"llama2","response":"","done":true,"context":[1,2,3]}
"#
    .trim();
}

pub fn openai_stream_fixture() -> &'static str {
    return r#"
data: {"choices":[{"index":0,"delta":{"role":"assistant"}}]}

data: {"choices":[{"index":0,"delta":{"content":"Hello "}}]}

data: {"choices":[{"index":0,"delta":{"content":"World"},"finish_reason":null}]}

data: {"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}

data: [DONE]
"#
    .trim();
}
