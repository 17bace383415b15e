//! End-to-end engine tests over program text.
//!
//! Comparisons are token-level: both sides are normalized so indentation and
//! line breaks don't matter, the way the upstream fixtures treat formatting.

use pretty_assertions::assert_eq;

use crate::config::MigratorConfig;
use crate::engine::migrate_script;
use crate::error::MigrateError;

fn migrate(source: &str) -> String {
    migrate_script(source, "test.ts", &MigratorConfig::default()).unwrap()
}

fn migrate_err(source: &str) -> MigrateError {
    migrate_script(source, "test.ts", &MigratorConfig::default()).unwrap_err()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '\'' | '"')
}

fn normalize(text: &str) -> String {
    let mut out = String::new();
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && out.chars().last().is_some_and(is_word_char) && is_word_char(c) {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

fn assert_migration(source: &str, expected: &str) {
    assert_eq!(normalize(&migrate(source)), normalize(expected));
}

#[test]
fn special_method_goes_to_root() {
    assert_migration(
        r#"@Component
export default class Test extends Vue {
    created() {
        console.log("OK");
    }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
    created() {
        console.log("OK");
    }
})"#,
    );
}

#[test]
fn method_goes_to_methods() {
    assert_migration(
        r#"@Component
export default class Test extends Vue {
    created() {
        console.log("OK");
    }
    myMethod(param1: string, p2, p3: any): void {
        console.log("hey")
    }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
    methods: {
        myMethod(param1: string, p2, p3: any): void {
            console.log("hey")
        }
    },
    created() {
        console.log("OK");
    }
})"#,
    );
}

#[test]
fn lifecycle_hooks_keep_source_order_around_plain_methods() {
    assert_migration(
        r#"@Component
export default class extends Vue {
    created() {
      console.log("on created");
    }
    doSomething() {
      console.log("do something");
    }
    mounted() {
      console.log("on mounted");
    }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  methods: {
    doSomething() {
      console.log("do something");
    }
  },
  created() {
    console.log("on created");
  },
  mounted() {
    console.log("on mounted");
  }
})"#,
    );
}

#[test]
fn nuxt_fetch_goes_to_root() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  async fetch({ app, store, route }: Context) {
    console.log('fetching...', app)
  }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  async fetch({ app, store, route }: Context) {
    console.log('fetching...', app)
  }
})"#,
    );
}

#[test]
fn setter_only_becomes_watch_entry() {
    assert_migration(
        r#"@Component
export default class Test extends Vue {
    set params(p1: string) {
        this.$emit("change", p1);
    }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
    watch: {
        params: {
            handler(p1: string) {
                this.$emit("change", p1);
            }
        }
    }
})"#,
    );
}

#[test]
fn getter_and_setter_collapse_into_computed_pair() {
    assert_migration(
        r#"@Component
export default class Test extends Vue {
    get params(): string {
        return "hello";
    }
    set params(p1: string) {
        this.$emit("change", p1);
    }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
    computed: {
        params: {
            get(): string {
                return "hello";
            },
            set(p1: string) {
                this.$emit("change", p1);
            }
        }
    }
})"#,
    );
}

#[test]
fn lone_getter_becomes_bare_computed_function() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  get prefectures() {
    return PrefectureDefinitions
  }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  computed: {
    prefectures() {
      return PrefectureDefinitions
    }
  }
})"#,
    );
}

#[test]
fn full_component_renders_in_style_guide_order() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  val = ''

  @Prop({ type: Object, required: true })
  member: Member

  get prefectures() {
    return PrefectureDefinitions
  }

  @Watch('prefecture')
  onChangePrefecture() {
    this.init()
  }

  created() {
    console.log('on created')
  }

  mounted() {
    this.init()
  }

  init() {
    this.val = this.value
  }

  change() {
    this.$emit('change')
  }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  props: {
    member: { type: Object, required: true }
  },
  data() {
    return {
      val: ''
    };
  },
  computed: {
    prefectures() {
      return PrefectureDefinitions
    }
  },
  watch: {
    'prefecture': [
      {
        handler() {
          this.init()
        }
      }
    ]
  },
  methods: {
    init() {
      this.val = this.value
    },
    change() {
      this.$emit('change')
    }
  },
  created() {
    console.log('on created')
  },
  mounted() {
    this.init()
  }
})"#,
    );
}

#[test]
fn watchers_on_the_same_target_merge_in_declaration_order() {
    let migrated = migrate(
        r#"import { Component, Watch } from 'vue-property-decorator';

@Component
export default class Test extends Vue {
  @Watch('value')
  onValue(newVal: string) {
    this.first(newVal);
  }

  @Watch('value', { immediate: true, deep: true })
  onValueAgain() {
    this.second();
  }
}"#,
    );
    let normalized = normalize(&migrated);

    assert_eq!(normalized.matches("'value':").count(), 1);
    let first = normalized.find("this.first").unwrap();
    let second = normalized.find("this.second").unwrap();
    assert!(first < second);
    assert!(normalized.contains("immediate:true"));
    assert!(normalized.contains("deep:true"));
    // Watched methods never also land under methods.
    assert!(!normalized.contains("methods:"));
}

#[test]
fn stacked_watch_decorators_fan_out_from_one_method() {
    let normalized = normalize(&migrate(
        r#"@Component
export default class extends Vue {
  @Watch('a')
  @Watch('b')
  onEither() {
    this.sync()
  }
}"#,
    ));
    assert!(normalized.contains("'a':["));
    assert!(normalized.contains("'b':["));
}

#[test]
fn untyped_prop_without_options_gets_an_empty_descriptor() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  @Prop() value
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  props: {
    value: {}
  }
})"#,
    );
}

#[test]
fn prop_type_is_synthesized_from_the_annotation() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  @Prop({ required: true }) label!: string
  @Prop() count!: number
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  props: {
    label: { type: String, required: true },
    count: { type: Number }
  }
})"#,
    );
}

#[test]
fn complex_prop_types_import_prop_type() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  @Prop() member!: Member
}"#,
        r#"import { defineComponent, PropType } from 'vue';
export default defineComponent({
  props: {
    member: { type: Object as PropType<Member> }
  }
})"#,
    );
}

#[test]
fn prop_sync_synthesizes_the_computed_pair() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  @PropSync('name', { type: String }) syncedName!: string
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  props: {
    name: { type: String }
  },
  computed: {
    syncedName: {
      get(): string {
        return this.name;
      },
      set(value: string) {
        this.$emit('update:name', value);
      }
    }
  }
})"#,
    );
}

#[test]
fn model_decorator_declares_prop_and_model() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  @Model('change', { type: Boolean }) checked!: boolean
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  model: { prop: 'checked', event: 'change' },
  props: {
    checked: { type: Boolean }
  }
})"#,
    );
}

#[test]
fn model_sync_wires_prop_model_and_computed() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  @ModelSync('checked', 'change', { type: Boolean })
  checkedValue!: boolean
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  model: { prop: 'checked', event: 'change' },
  props: {
    checked: { type: Boolean }
  },
  computed: {
    checkedValue: {
      get(): boolean {
        return this.checked;
      },
      set(value: boolean) {
        this.$emit('change', value);
      }
    }
  }
})"#,
    );
}

#[test]
fn refs_become_uncached_computed_accessors() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  @Ref() anchor!: HTMLElement
  @Ref('list') items!: HTMLUListElement
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  computed: {
    anchor: {
      cache: false,
      get() {
        return this.$refs.anchor as HTMLElement;
      }
    },
    items: {
      cache: false,
      get() {
        return this.$refs.list as HTMLUListElement;
      }
    }
  }
})"#,
    );
}

#[test]
fn store_bindings_render_as_helper_spreads() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  @State('count') count!: number
  @State('cart.items') items!: Item[]
  @Getter('isAdmin') isAdmin!: boolean
  @Action('checkout') checkout!: () => Promise<void>
}"#,
        r#"import { defineComponent } from 'vue';
import { mapActions, mapGetters, mapState } from 'vuex';
export default defineComponent({
  ...mapState({ count: 'count', items: 'cart.items' }),
  ...mapGetters(['isAdmin']),
  ...mapActions(['checkout'])
})"#,
    );
}

#[test]
fn component_arguments_seed_the_options_object() {
    assert_migration(
        r#"@Component({
  name: 'MyComp',
  components: { Child }
})
export default class extends Vue {
  created() {
    this.init()
  }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  name: 'MyComp',
  components: { Child },
  created() {
    this.init()
  }
})"#,
    );
}

#[test]
fn mixins_superclass_becomes_a_mixins_entry() {
    assert_migration(
        r#"@Component
export default class extends mixins(A, B) {
  created() {
    this.init()
  }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  mixins: [A, B],
  created() {
    this.init()
  }
})"#,
    );
}

#[test]
fn foreign_base_class_becomes_an_extends_entry() {
    assert_migration(
        r#"@Component
export default class extends BaseView {
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  extends: BaseView
})"#,
    );
}

#[test]
fn class_data_method_is_hoisted_verbatim() {
    assert_migration(
        r#"@Component
export default class extends Vue {
  data() {
    return { a: 1 };
  }
}"#,
        r#"import { defineComponent } from 'vue';
export default defineComponent({
  data() {
    return { a: 1 };
  }
})"#,
    );
}

#[test]
fn data_method_and_data_fields_collide() {
    let err = migrate_err(
        r#"@Component
export default class extends Vue {
  val = ''
  data() {
    return { a: 1 };
  }
}"#,
    );
    assert!(matches!(err, MigrateError::DuplicateEntry { .. }));
}

#[test]
fn unknown_member_decorator_aborts_the_file() {
    let err = migrate_err(
        r#"@Component
export default class extends Vue {
  @Emit('change')
  emitChange() {}
}"#,
    );
    let MigrateError::UnsupportedDecorator { member, decorator } = err else {
        panic!("expected unsupported decorator, got something else");
    };
    assert_eq!(member, "emitChange");
    assert_eq!(decorator, "Emit");
}

#[test]
fn file_without_marker_is_already_migrated() {
    let err = migrate_err("export default class Test extends Vue {}\n");
    assert!(matches!(err, MigrateError::AlreadyMigrated));
}

#[test]
fn every_member_lands_exactly_once() {
    let migrated = migrate(
        r#"@Component
export default class extends Vue {
  val = ''
  @Prop() size!: number
  get doubled() { return this.val + this.val }
  @Watch('size')
  onSize() { this.refresh() }
  created() { this.refresh() }
  refresh() { this.val = String(this.size) }
}"#,
    );
    let normalized = normalize(&migrated);

    for needle in [
        "val:''",
        "size:{type:Number}",
        "doubled()",
        "'size':[",
        "created(){this.refresh()}",
        "refresh(){this.val=String(this.size)}",
    ] {
        assert_eq!(
            normalized.matches(needle).count(),
            1,
            "expected exactly one `{}` in `{}`",
            needle,
            normalized
        );
    }
    // The watcher body appears in watch, and refresh stays a method: two
    // `this.refresh()` call sites, one handler, one hook.
    assert_eq!(normalized.matches("this.refresh()").count(), 2);
}

#[test]
fn custom_import_source_is_honored() {
    let config = MigratorConfig {
        import_source: "~/lib/helper/fallback-composition-api".to_string(),
        ..MigratorConfig::default()
    };
    let migrated = migrate_script(
        "@Component\nexport default class extends Vue {}\n",
        "test.ts",
        &config,
    )
    .unwrap();
    assert!(
        migrated
            .contains("import { defineComponent } from '~/lib/helper/fallback-composition-api';")
    );
}
