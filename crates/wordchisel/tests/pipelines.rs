//! End-to-end tokenizer pipelines, one per model family.

use proptest::prelude::*;
use serde_json::{Map, Value, json};
use wordchisel::{
    Tokenizer,
    WordchiselError,
    models::UnigramModel,
    tokenizer::{DecodeOptions, EncodeOptions, Padding},
    vocab::ByteTable,
};

fn build(
    tokenizer: Value,
    settings: Option<Value>,
) -> Tokenizer<u32> {
    let settings = settings.map(|s| s.to_string());
    Tokenizer::from_json_str(&tokenizer.to_string(), settings.as_deref()).unwrap()
}

fn bert_config() -> Value {
    json!({
        "added_tokens": [
            {"id": 0, "content": "[PAD]", "special": true},
            {"id": 6, "content": "[UNK]", "special": true},
            {"id": 7, "content": "[CLS]", "special": true},
            {"id": 8, "content": "[SEP]", "special": true}
        ],
        "normalizer": {"type": "BertNormalizer", "lowercase": true},
        "pre_tokenizer": {"type": "BertPreTokenizer"},
        "post_processor": {
            "type": "BertProcessing",
            "cls": ["[CLS]", 7],
            "sep": ["[SEP]", 8]
        },
        "decoder": {"type": "WordPiece"},
        "model": {
            "type": "WordPiece",
            "unk_token": "[UNK]",
            "vocab": {
                "[PAD]": 0, "a": 1, "b": 2, "c": 3, "d": 4, "e": 5,
                "[UNK]": 6, "[CLS]": 7, "[SEP]": 8, "##b": 9
            }
        }
    })
}

fn bert() -> Tokenizer<u32> {
    build(
        bert_config(),
        Some(json!({
            "tokenizer_class": "BertTokenizerFast",
            "pad_token": "[PAD]",
            "model_max_length": 512
        })),
    )
}

#[test]
fn test_bert_pair_segments() {
    let tokenizer = bert();
    let encoding = tokenizer.encode_plus("a b", Some("c"), true).unwrap();
    assert_eq!(encoding.input_ids, vec![7, 1, 2, 8, 3, 8]);
    assert_eq!(encoding.token_type_ids, Some(vec![0, 0, 0, 0, 1, 1]));
}

#[test]
fn test_bert_batch_padding() {
    let tokenizer = bert();
    let options = EncodeOptions::default()
        .with_add_special_tokens(false)
        .with_padding(Padding::Longest);
    let batch = tokenizer
        .encode_batch(&["a b c", "a b"], None, &options)
        .unwrap();
    assert_eq!(batch.input_ids(), vec![vec![1, 2, 3], vec![1, 2, 0]]);
    assert_eq!(batch.attention_mask(), vec![vec![1, 1, 1], vec![1, 1, 0]]);

    let tensor = batch.into_tensor().unwrap();
    assert_eq!(tensor.dims, [2, 3]);
    assert_eq!(tensor.input_ids, vec![1, 2, 3, 1, 2, 0]);
    assert_eq!(tensor.token_type_ids, Some(vec![0; 6]));
}

#[test]
fn test_bert_batch_truncation() {
    let tokenizer = bert();
    let options = EncodeOptions::default()
        .with_add_special_tokens(false)
        .with_truncation(true)
        .with_max_length(Some(3));
    let batch = tokenizer
        .encode_batch(&["a b c d e"], None, &options)
        .unwrap();
    assert_eq!(batch.input_ids(), vec![vec![1, 2, 3]]);

    let ragged = tokenizer
        .encode_batch(&["a b c", "a"], None, &EncodeOptions::default())
        .unwrap();
    assert!(matches!(
        ragged.into_tensor(),
        Err(WordchiselError::RaggedBatch)
    ));
}

#[test]
fn test_bert_pad_to_model_max_length() {
    let tokenizer = build(
        bert_config(),
        Some(json!({"pad_token": "[PAD]", "model_max_length": 4})),
    );
    let options = EncodeOptions::default()
        .with_add_special_tokens(false)
        .with_padding(Padding::MaxLength);
    let batch = tokenizer.encode_batch(&["a b", "a"], None, &options).unwrap();
    assert_eq!(batch.input_ids(), vec![vec![1, 2, 0, 0], vec![1, 0, 0, 0]]);
    assert_eq!(batch.attention_mask(), vec![vec![1, 1, 0, 0], vec![1, 0, 0, 0]]);
}

#[test]
fn test_bert_max_length_clamped_to_model() {
    let tokenizer = build(
        bert_config(),
        Some(json!({"pad_token": "[PAD]", "model_max_length": 4})),
    );
    let options = EncodeOptions::default()
        .with_add_special_tokens(false)
        .with_truncation(true)
        .with_padding(Padding::MaxLength)
        .with_max_length(Some(10));
    let batch = tokenizer
        .encode_batch(&["a b c d e a", "a"], None, &options)
        .unwrap();
    assert_eq!(batch.input_ids(), vec![vec![1, 2, 3, 4], vec![1, 0, 0, 0]]);
}

#[test]
fn test_bert_left_padding() {
    let tokenizer = build(
        bert_config(),
        Some(json!({"pad_token": "[PAD]", "padding_side": "left"})),
    );
    let options = EncodeOptions::default()
        .with_add_special_tokens(false)
        .with_padding(Padding::Longest);
    let batch = tokenizer
        .encode_batch(&["a b c", "a"], None, &options)
        .unwrap();
    assert_eq!(batch.input_ids(), vec![vec![1, 2, 3], vec![0, 0, 1]]);
    assert_eq!(batch.attention_mask(), vec![vec![1, 1, 1], vec![0, 0, 1]]);
}

#[test]
fn test_padding_without_pad_token() {
    let tokenizer = build(bert_config(), None);
    let options = EncodeOptions::default().with_padding(Padding::Longest);
    assert!(matches!(
        tokenizer.encode_batch(&["a b c", "a"], None, &options),
        Err(WordchiselError::MissingToken { name: "pad_token" })
    ));

    // Equal lengths need no padding.
    assert!(tokenizer.encode_batch(&["a", "b"], None, &options).is_ok());
}

#[test]
fn test_bert_decode() {
    let tokenizer = bert();
    let ids = tokenizer.encode("A ab, e", None, true).unwrap();
    assert_eq!(ids, vec![7, 1, 1, 9, 6, 5, 8]);

    assert_eq!(
        tokenizer.decode(&ids, &DecodeOptions::default()).unwrap(),
        "[CLS] a ab [UNK] e [SEP]"
    );
    let options = DecodeOptions::default().with_skip_special_tokens(true);
    assert_eq!(tokenizer.decode(&ids, &options).unwrap(), "a ab e");
}

/// A byte-level BPE over the 256 byte chars, plus a few merges.
fn gpt2() -> Tokenizer<u32> {
    let table = ByteTable::gpt2();
    let mut vocab = Map::new();
    for byte in 0..=255u8 {
        vocab.insert(table.byte_to_char(byte).to_string(), json!(byte));
    }
    for (id, token) in ["He", "ll", "llo", "Hello", "Ġw", "Ġwor"].iter().enumerate() {
        vocab.insert(token.to_string(), json!(256 + id));
    }

    build(
        json!({
            "added_tokens": [
                {"id": 262, "content": "<|endoftext|>", "special": true}
            ],
            "pre_tokenizer": {"type": "ByteLevel", "add_prefix_space": false},
            "post_processor": {"type": "ByteLevel"},
            "decoder": {"type": "ByteLevel"},
            "model": {
                "type": "BPE",
                "vocab": vocab,
                "merges": ["H e", "l l", "ll o", "He llo", "Ġ w", "Ġw o", "Ġwo r"]
            }
        }),
        Some(json!({"clean_up_tokenization_spaces": false})),
    )
}

#[test]
fn test_gpt2_round_trip() {
    let tokenizer = gpt2();
    let text = "Hello world ✓<|endoftext|>";

    let tokens = tokenizer.encode_text(text).unwrap();
    assert_eq!(&tokens[..3], &["Hello", "Ġwor", "l"]);
    assert_eq!(tokens.last().map(String::as_str), Some("<|endoftext|>"));

    let ids = tokenizer.encode(text, None, true).unwrap();
    assert_eq!(&ids[..2], &[259, 261]);
    assert_eq!(
        tokenizer.decode(&ids, &DecodeOptions::default()).unwrap(),
        text
    );
    assert_eq!(
        tokenizer
            .decode(&ids, &DecodeOptions::default().with_skip_special_tokens(true))
            .unwrap(),
        "Hello world ✓"
    );
}

fn llama() -> Tokenizer<u32> {
    build(
        json!({
            "added_tokens": [
                {"id": 0, "content": "<unk>", "special": true},
                {"id": 1, "content": "<s>", "special": true},
                {"id": 2, "content": "</s>", "special": true}
            ],
            "normalizer": {
                "type": "Sequence",
                "normalizers": [
                    {"type": "Prepend", "prepend": "▁"},
                    {"type": "Replace", "pattern": {"String": " "}, "content": "▁"}
                ]
            },
            "post_processor": {
                "type": "TemplateProcessing",
                "single": [
                    {"SpecialToken": {"id": "<s>", "type_id": 0}},
                    {"Sequence": {"id": "A", "type_id": 0}}
                ]
            },
            "decoder": {
                "type": "Sequence",
                "decoders": [
                    {"type": "Replace", "pattern": {"String": "▁"}, "content": " "},
                    {"type": "ByteFallback"},
                    {"type": "Fuse"},
                    {"type": "Strip", "content": " ", "start": 1, "stop": 0}
                ]
            },
            "model": {
                "type": "BPE",
                "unk_token": "<unk>",
                "byte_fallback": true,
                "fuse_unk": true,
                "vocab": {
                    "<unk>": 0, "<s>": 1, "</s>": 2,
                    "<0xE2>": 3, "<0x9C>": 4, "<0x93>": 5,
                    "▁": 6, "H": 7, "e": 8, "l": 9, "o": 10,
                    "▁H": 11, "ll": 12, "▁He": 13, "llo": 14, "▁Hello": 15, "!": 16
                },
                "merges": ["▁ H", "l l", "▁H e", "ll o", "▁He llo"]
            }
        }),
        None,
    )
}

#[test]
fn test_llama_byte_fallback() {
    let tokenizer = llama();
    let ids = tokenizer.encode("Hello ✓!", None, true).unwrap();
    assert_eq!(ids, vec![1, 15, 6, 3, 4, 5, 16]);

    let options = DecodeOptions::default().with_skip_special_tokens(true);
    assert_eq!(tokenizer.decode(&ids, &options).unwrap(), "Hello ✓!");
}

fn t5_config() -> Value {
    json!({
        "type": "Unigram",
        "unk_id": 2,
        "vocab": [
            ["<pad>", 0.0], ["</s>", 0.0], ["<unk>", 0.0],
            ["▁", -2.0], ["▁hello", -5.0], ["▁he", -4.0],
            ["h", -3.0], ["e", -3.0], ["l", -3.0], ["o", -3.0], ["llo", -4.0]
        ]
    })
}

fn t5() -> Tokenizer<u32> {
    build(
        json!({
            "added_tokens": [
                {"id": 0, "content": "<pad>", "special": true},
                {"id": 1, "content": "</s>", "special": true},
                {"id": 2, "content": "<unk>", "special": true}
            ],
            "normalizer": {"type": "Precompiled", "precompiled_charsmap": null},
            "pre_tokenizer": {"type": "Metaspace", "replacement": "▁"},
            "post_processor": {
                "type": "TemplateProcessing",
                "single": [
                    {"Sequence": {"id": "A", "type_id": 0}},
                    {"SpecialToken": {"id": "</s>", "type_id": 0}}
                ]
            },
            "decoder": {"type": "Metaspace", "replacement": "▁"},
            "model": t5_config()
        }),
        Some(json!({"pad_token": "<pad>", "eos_token": "</s>"})),
    )
}

#[test]
fn test_t5_unigram() {
    let tokenizer = t5();
    assert_eq!(tokenizer.encode("hello", None, true).unwrap(), vec![4, 1]);
    assert_eq!(
        tokenizer.encode_text("hex").unwrap(),
        vec!["▁he".to_string(), "x".to_string()]
    );
    assert_eq!(tokenizer.encode("hex", None, false).unwrap(), vec![5, 2]);

    let options = DecodeOptions::default().with_skip_special_tokens(true);
    assert_eq!(tokenizer.decode(&[4, 1], &options).unwrap(), "hello");
}

#[test]
fn test_wav2vec2_ctc() {
    let tokenizer = build(
        json!({
            "decoder": {"type": "CTC", "pad_token": "<pad>", "word_delimiter_token": "|"},
            "model": {
                "vocab": {
                    "<pad>": 0, "<s>": 1, "</s>": 2, "<unk>": 3, "|": 4,
                    "E": 5, "H": 6, "L": 7, "O": 8, "W": 9, "R": 10, "D": 11
                }
            }
        }),
        Some(json!({"unk_token": "<unk>", "pad_token": "<pad>"})),
    );
    assert_eq!(tokenizer.model().kind_name(), "Legacy");

    let ids = [6, 6, 5, 7, 0, 7, 8, 4, 9, 8, 10, 7, 11];
    assert_eq!(
        tokenizer.decode(&ids, &DecodeOptions::default()).unwrap(),
        "HELLO WORLD"
    );
    assert_eq!(
        tokenizer.convert_tokens_to_ids(&["H", "?"]).unwrap(),
        vec![6, 3]
    );
}

#[test]
fn test_bpe_merge_ranks() {
    let tokenizer = build(
        json!({
            "model": {
                "type": "BPE",
                "vocab": {
                    "l": 0, "o": 1, "w": 2, "e": 3, "r": 4,
                    "lo": 5, "low": 6, "lowe": 7, "lower": 8
                },
                "merges": [["l", "o"], ["lo", "w"], ["low", "e"], ["lowe", "r"]]
            }
        }),
        None,
    );
    assert_eq!(tokenizer.encode_text("lower").unwrap(), vec!["lower"]);
    assert_eq!(tokenizer.encode_text("rowel").unwrap(), vec!["r", "o", "w", "e", "l"]);
    assert_eq!(tokenizer.encode("lower", None, true).unwrap(), vec![8]);
}

#[test]
fn test_unknown_component() {
    let result = Tokenizer::<u32>::from_json_str(
        &json!({
            "normalizer": {"type": "Bogus"},
            "model": {"type": "WordPiece", "vocab": {"a": 0}}
        })
        .to_string(),
        None,
    );
    assert!(matches!(
        result,
        Err(WordchiselError::UnknownComponentType {
            component: "normalizer",
            ..
        })
    ));
}

#[test]
fn test_unknown_without_unk_token() {
    let wordpiece = build(
        json!({"model": {"type": "WordPiece", "vocab": {"a": 0}}}),
        None,
    );
    assert_eq!(wordpiece.encode_text("z").unwrap(), vec!["[UNK]"]);
    assert!(matches!(
        wordpiece.encode("z", None, false),
        Err(WordchiselError::UnknownToken { token }) if token == "[UNK]"
    ));

    let mut config = t5_config();
    config.as_object_mut().unwrap().remove("unk_id");
    let unigram = build(json!({"model": config}), None);
    assert!(matches!(
        unigram.encode("hex", None, false),
        Err(WordchiselError::UnknownToken { token }) if token == "x"
    ));
}

fn wordpiece() -> Tokenizer<u32> {
    build(
        json!({
            "model": {
                "type": "WordPiece",
                "unk_token": "[UNK]",
                "vocab": {"[UNK]": 0, "a": 1, "b": 2, "ab": 3, "##a": 4, "##b": 5}
            }
        }),
        None,
    )
}

/// WordPiece over whitespace-split words, with its decoder.
fn wordpiece_words() -> Tokenizer<u32> {
    build(
        json!({
            "pre_tokenizer": {"type": "WhitespaceSplit"},
            "decoder": {"type": "WordPiece"},
            "model": {
                "type": "WordPiece",
                "unk_token": "[UNK]",
                "vocab": {"[UNK]": 0, "a": 1, "b": 2, "ab": 3, "##a": 4, "##b": 5}
            }
        }),
        None,
    )
}

proptest! {
    #[test]
    fn prop_byte_level_round_trip(text in "\\PC{0,40}") {
        prop_assume!(!text.is_empty());
        let tokenizer = gpt2();
        let ids = tokenizer.encode(&text, None, false).unwrap();
        let decoded = tokenizer.decode(&ids, &DecodeOptions::default()).unwrap();
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn prop_unigram_covers_word(word in "[helox▁]{1,16}") {
        let (model, _) = UnigramModel::from_config::<u32>(&t5_config()).unwrap();
        let mut tokens = Vec::new();
        model.tokenize_append(&word, &mut tokens);
        prop_assert!(tokens.iter().all(|t| !t.is_empty()));
        prop_assert_eq!(tokens.concat(), word);
    }

    #[test]
    fn prop_wordpiece_all_or_nothing(word in "[abc]{1,10}") {
        let tokenizer = wordpiece();
        let tokens = tokenizer.encode_text(&word).unwrap();
        if word.contains('c') {
            prop_assert_eq!(tokens, vec!["[UNK]".to_string()]);
        } else {
            let joined: String = tokens
                .iter()
                .map(|t| t.strip_prefix("##").unwrap_or(t))
                .collect();
            prop_assert_eq!(joined, word);
        }
    }

    #[test]
    fn prop_wordpiece_round_trip(text in "[ab]{1,6}( [ab]{1,6}){0,4}") {
        let tokenizer = wordpiece_words();
        let ids = tokenizer.encode(&text, None, true).unwrap();
        let options = DecodeOptions::default().with_skip_special_tokens(true);
        prop_assert_eq!(tokenizer.decode(&ids, &options).unwrap(), text);
    }

    #[test]
    fn prop_unigram_round_trip(text in "[helo]{1,6}( [helo]{1,6}){0,3}") {
        let tokenizer = t5();
        let ids = tokenizer.encode(&text, None, true).unwrap();
        prop_assert_eq!(ids.last().copied(), Some(1));
        let options = DecodeOptions::default().with_skip_special_tokens(true);
        prop_assert_eq!(tokenizer.decode(&ids, &options).unwrap(), text);
    }
}
