//! Qwen text-to-image workflow builder.
//!
//! Constructs the fixed eleven-node graph ComfyUI executes for each
//! illustration: model/CLIP/VAE loaders, the Lightning LoRA, AuraFlow
//! sampling shift, positive and empty negative text encodes, an empty
//! SD3 latent, the KSampler, VAE decode, and the SaveImage sink. Only
//! the prompt text and the sampler seed vary between jobs.

use rand::Rng;

/// Diffusion model checkpoint.
pub const UNET_MODEL: &str = "qwen_image_2512_fp8_e4m3fn.safetensors";
/// Text encoder checkpoint.
pub const CLIP_MODEL: &str = "qwen_2.5_vl_7b_fp8_scaled.safetensors";
/// VAE checkpoint.
pub const VAE_MODEL: &str = "qwen_image_vae.safetensors";
/// Lightning LoRA enabling 4-step sampling.
pub const LORA_MODEL: &str = "Qwen-Image-2512-Lightning-4steps-V1.0-bf16.safetensors";

/// Output resolution (square).
pub const IMAGE_SIZE: u32 = 1328;
/// Sampling steps (matched to the Lightning LoRA).
pub const STEPS: u32 = 4;
/// Classifier-free guidance scale.
pub const CFG: f64 = 1.0;
/// Sampler name.
pub const SAMPLER: &str = "euler";
/// Scheduler name.
pub const SCHEDULER: &str = "simple";
/// AuraFlow model sampling shift.
pub const SHIFT: f64 = 3.1;
/// Filename prefix the server uses for its own copies of the outputs.
pub const FILENAME_PREFIX: &str = "focal";

/// Upper bound (inclusive) for randomly drawn seeds.
pub const MAX_SEED: i64 = 2_147_483_647;

/// Build the workflow graph for one prompt.
///
/// Pure function of its inputs: the same prompt and explicit seed
/// always produce an identical graph. When `seed` is `None` a random
/// seed in `0..=MAX_SEED` is drawn.
pub fn qwen_text_to_image(prompt: &str, seed: Option<i64>) -> serde_json::Value {
    let seed = seed.unwrap_or_else(|| rand::rng().random_range(0..=MAX_SEED));

    serde_json::json!({
        "1": {
            "class_type": "UNETLoader",
            "inputs": {
                "unet_name": UNET_MODEL,
                "weight_dtype": "default"
            }
        },
        "2": {
            "class_type": "CLIPLoader",
            "inputs": {
                "clip_name": CLIP_MODEL,
                "type": "qwen_image",
                "device": "default"
            }
        },
        "3": {
            "class_type": "VAELoader",
            "inputs": {
                "vae_name": VAE_MODEL
            }
        },
        "4": {
            "class_type": "LoraLoaderModelOnly",
            "inputs": {
                "model": ["1", 0],
                "lora_name": LORA_MODEL,
                "strength_model": 1.0
            }
        },
        "5": {
            "class_type": "ModelSamplingAuraFlow",
            "inputs": {
                "model": ["4", 0],
                "shift": SHIFT
            }
        },
        "6": {
            "class_type": "CLIPTextEncode",
            "inputs": {
                "clip": ["2", 0],
                "text": prompt
            }
        },
        "7": {
            "class_type": "CLIPTextEncode",
            "inputs": {
                "clip": ["2", 0],
                "text": ""
            }
        },
        "8": {
            "class_type": "EmptySD3LatentImage",
            "inputs": {
                "width": IMAGE_SIZE,
                "height": IMAGE_SIZE,
                "batch_size": 1
            }
        },
        "9": {
            "class_type": "KSampler",
            "inputs": {
                "model": ["5", 0],
                "positive": ["6", 0],
                "negative": ["7", 0],
                "latent_image": ["8", 0],
                "seed": seed,
                "steps": STEPS,
                "cfg": CFG,
                "sampler_name": SAMPLER,
                "scheduler": SCHEDULER,
                "denoise": 1.0
            }
        },
        "10": {
            "class_type": "VAEDecode",
            "inputs": {
                "samples": ["9", 0],
                "vae": ["3", 0]
            }
        },
        "11": {
            "class_type": "SaveImage",
            "inputs": {
                "images": ["10", 0],
                "filename_prefix": FILENAME_PREFIX
            }
        }
    })
}
