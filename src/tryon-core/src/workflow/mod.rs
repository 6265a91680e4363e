use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Node id of the image loader in the try-on graph.
pub const LOAD_IMAGE_NODE: &str = "6";
/// Node id of the image writer in the try-on graph.
pub const SAVE_IMAGE_NODE: &str = "7";
/// Node id of the LLM render node in the try-on graph.
pub const LLM_NODE: &str = "8";

/// Filename prefix the SaveImage node writes under. Output collection
/// filters on `<prefix>_`.
pub const SAVE_FILENAME_PREFIX: &str = "ComfyUI";

/// One unit of work in the graph: a class type and its concrete input
/// values. Inputs referencing another node's output are two-element arrays
/// `[node_id, output_index]`; the server resolves them, we only carry them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Node {
    pub inputs: Value,
    pub class_type: String,
    #[serde(rename = "_meta")]
    pub meta: NodeMeta,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeMeta {
    pub title: String,
}

/// A workflow graph as ComfyUI consumes it: a mapping from node id to node
/// descriptor. Ordered so the serialized form is stable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Workflow {
    nodes: BTreeMap<String, Node>,
}

impl Workflow {
    pub fn insert(&mut self, id: impl Into<String>, node: Node) {
        self.nodes.insert(id.into(), node);
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn node(class_type: &str, title: &str, inputs: Value) -> Node {
    Node {
        inputs,
        class_type: class_type.to_string(),
        meta: NodeMeta {
            title: title.to_string(),
        },
    }
}

/// Builds the fixed three-node try-on graph: load the staged jewelry image,
/// hand it to the IF_LLM node for the Gemini-driven render, save the result.
pub fn try_on_workflow(image_name: &str, prompt: &str, api_key: &str, seed: u64) -> Workflow {
    let mut workflow = Workflow::default();
    workflow.insert(
        LOAD_IMAGE_NODE,
        node(
            "LoadImage",
            "Load Image",
            json!({
                "image": image_name,
            }),
        ),
    );
    workflow.insert(
        SAVE_IMAGE_NODE,
        node(
            "SaveImage",
            "Save Image",
            json!({
                "filename_prefix": SAVE_FILENAME_PREFIX,
                "images": [LLM_NODE, 4],
            }),
        ),
    );
    workflow.insert(
        LLM_NODE,
        node(
            "IF_LLM",
            "IF LLM🎨",
            json!({
                "llm_provider": "gemini",
                "llm_model": "gemini-2.0-flash-exp",
                "base_ip": "localhost",
                "port": "11434",
                "user_prompt": prompt,
                "strategy": "gemini2_create",
                "profiles": "None",
                "embellish_prompt": "None",
                "style_prompt": "None",
                "neg_prompt": "None",
                "stop_string": "None",
                "max_tokens": 2048,
                "random": false,
                "seed": seed,
                "keep_alive": true,
                "clear_history": true,
                "history_steps": 10,
                "aspect_ratio": "1:1",
                "auto": false,
                "batch_count": 1,
                "external_api_key": api_key,
                "attention": "sdpa",
                "Store Auto Prompt": null,
                "images": [LOAD_IMAGE_NODE, 0],
            }),
        ),
    );
    workflow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_on_graph_matches_the_wire_format() {
        let workflow = try_on_workflow("jewelry_1700000000.png", "woman wear this jewelry", "k3y", 1222);

        let expected = json!({
            "6": {
                "inputs": {
                    "image": "jewelry_1700000000.png",
                },
                "class_type": "LoadImage",
                "_meta": { "title": "Load Image" },
            },
            "7": {
                "inputs": {
                    "filename_prefix": "ComfyUI",
                    "images": ["8", 4],
                },
                "class_type": "SaveImage",
                "_meta": { "title": "Save Image" },
            },
            "8": {
                "inputs": {
                    "llm_provider": "gemini",
                    "llm_model": "gemini-2.0-flash-exp",
                    "base_ip": "localhost",
                    "port": "11434",
                    "user_prompt": "woman wear this jewelry",
                    "strategy": "gemini2_create",
                    "profiles": "None",
                    "embellish_prompt": "None",
                    "style_prompt": "None",
                    "neg_prompt": "None",
                    "stop_string": "None",
                    "max_tokens": 2048,
                    "random": false,
                    "seed": 1222,
                    "keep_alive": true,
                    "clear_history": true,
                    "history_steps": 10,
                    "aspect_ratio": "1:1",
                    "auto": false,
                    "batch_count": 1,
                    "external_api_key": "k3y",
                    "attention": "sdpa",
                    "Store Auto Prompt": null,
                    "images": ["6", 0],
                },
                "class_type": "IF_LLM",
                "_meta": { "title": "IF LLM🎨" },
            },
        });

        assert_eq!(serde_json::to_value(&workflow).unwrap(), expected);
    }

    #[test]
    fn the_graph_wires_load_into_llm_into_save() {
        let workflow = try_on_workflow("img.png", "p", "k", 7);
        assert_eq!(workflow.len(), 3);

        let llm = workflow.get(LLM_NODE).unwrap();
        assert_eq!(llm.inputs["images"], json!([LOAD_IMAGE_NODE, 0]));
        assert_eq!(llm.inputs["seed"], json!(7));
        assert_eq!(llm.inputs["user_prompt"], json!("p"));

        let save = workflow.get(SAVE_IMAGE_NODE).unwrap();
        assert_eq!(save.inputs["images"][0], json!(LLM_NODE));
    }

    #[test]
    fn round_trips_through_json() {
        let workflow = try_on_workflow("img.png", "p", "k", 7);
        let text = serde_json::to_string(&workflow).unwrap();
        let back: Workflow = serde_json::from_str(&text).unwrap();
        assert_eq!(back, workflow);
    }
}
