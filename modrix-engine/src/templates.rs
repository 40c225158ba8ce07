//! Generated-source template contents
//!
//! Handlebars templates for the Java sources and auxiliary files the
//! element generator emits. Rendered with escaping disabled; the context
//! carries `package`, `mod_id`, `class_name`, `constant_name`,
//! `registry_name`, `max_stack_size`, `glint` and an optional `food`
//! object.

/// Fabric item class for Minecraft 1.21+, where item settings carry the
/// registry key.
pub const FABRIC_ITEM_1_21: &str = r#"package {{package}}.item;

{{#if food}}import net.minecraft.component.type.FoodComponent;
{{/if}}import net.minecraft.item.Item;
import net.minecraft.registry.Registries;
import net.minecraft.registry.Registry;
import net.minecraft.registry.RegistryKey;
import net.minecraft.registry.RegistryKeys;
{{#if glint}}import net.minecraft.item.ItemStack;
{{/if}}import net.minecraft.util.Identifier;

public class {{class_name}} {
    public static final RegistryKey<Item> KEY =
            RegistryKey.of(RegistryKeys.ITEM, Identifier.of("{{mod_id}}", "{{registry_name}}"));

    public static final Item {{constant_name}} = new Item(new Item.Settings()
            .registryKey(KEY)
            .maxCount({{max_stack_size}}){{#if food}}
            .food(new FoodComponent.Builder()
                    .nutrition({{food.nutrition}})
                    .saturationModifier({{food.saturation}}f)
                    .build()){{/if}}){{#if glint}} {
        @Override
        public boolean hasGlint(ItemStack stack) {
            return true;
        }
    }{{/if}};

    public static void register() {
        Registry.register(Registries.ITEM, KEY, {{constant_name}});
    }
}
"#;

/// Fabric item class for Minecraft 1.19–1.20.
pub const FABRIC_ITEM_1_19: &str = r#"package {{package}}.item;

{{#if food}}import net.minecraft.item.FoodComponent;
{{/if}}import net.minecraft.item.Item;
{{#if glint}}import net.minecraft.item.ItemStack;
{{/if}}import net.minecraft.registry.Registries;
import net.minecraft.registry.Registry;
import net.minecraft.util.Identifier;

public class {{class_name}} {
    public static final Item {{constant_name}} = new Item(new Item.Settings()
            .maxCount({{max_stack_size}}){{#if food}}
            .food(new FoodComponent.Builder()
                    .hunger({{food.nutrition}})
                    .saturationModifier({{food.saturation}}f)
                    .build()){{/if}}){{#if glint}} {
        @Override
        public boolean hasGlint(ItemStack stack) {
            return true;
        }
    }{{/if}};

    public static void register() {
        Registry.register(Registries.ITEM,
                new Identifier("{{mod_id}}", "{{registry_name}}"), {{constant_name}});
    }
}
"#;

/// Fabric item class for the pre-1.19 registry API.
pub const FABRIC_ITEM_LEGACY: &str = r#"package {{package}}.item;

{{#if food}}import net.minecraft.item.FoodComponent;
{{/if}}import net.minecraft.item.Item;
{{#if glint}}import net.minecraft.item.ItemStack;
{{/if}}import net.minecraft.util.Identifier;
import net.minecraft.util.registry.Registry;

public class {{class_name}} {
    public static final Item {{constant_name}} = new Item(new Item.Settings()
            .maxCount({{max_stack_size}}){{#if food}}
            .food(new FoodComponent.Builder()
                    .hunger({{food.nutrition}})
                    .saturationModifier({{food.saturation}}f)
                    .build()){{/if}}){{#if glint}} {
        @Override
        public boolean hasGlint(ItemStack stack) {
            return true;
        }
    }{{/if}};

    public static void register() {
        Registry.register(Registry.ITEM,
                new Identifier("{{mod_id}}", "{{registry_name}}"), {{constant_name}});
    }
}
"#;

/// Forge/NeoForge item class backed by the shared `ModItems` deferred
/// register.
pub const FORGE_ITEM: &str = r#"package {{package}}.item;

{{#if food}}import net.minecraft.world.food.FoodProperties;
{{/if}}import net.minecraft.world.item.Item;
{{#if glint}}import net.minecraft.world.item.ItemStack;
{{/if}}import net.minecraftforge.registries.RegistryObject;

public class {{class_name}} {
    public static final RegistryObject<Item> {{constant_name}} = ModItems.ITEMS.register("{{registry_name}}",
            () -> new Item(new Item.Properties()
                    .stacksTo({{max_stack_size}}){{#if food}}
                    .food(new FoodProperties.Builder()
                            .nutrition({{food.nutrition}})
                            .saturationMod({{food.saturation}}f)
                            .build()){{/if}}){{#if glint}} {
                @Override
                public boolean isFoil(ItemStack stack) {
                    return true;
                }
            }{{/if}});
}
"#;

/// Forge registry class, created the first time an item is generated.
pub const FORGE_MOD_ITEMS: &str = r#"package {{package}}.item;

import net.minecraft.world.item.Item;
import net.minecraftforge.eventbus.api.IEventBus;
import net.minecraftforge.registries.DeferredRegister;
import net.minecraftforge.registries.ForgeRegistries;

public class ModItems {
    public static final DeferredRegister<Item> ITEMS =
            DeferredRegister.create(ForgeRegistries.ITEMS, "{{mod_id}}");

    public static void register(IEventBus bus) {
        ITEMS.register(bus);
    }
}
"#;

/// Minimal flat item model referencing the copied texture.
pub const ITEM_MODEL_JSON: &str = r#"{
  "parent": "minecraft:item/generated",
  "textures": {
    "layer0": "{{mod_id}}:item/{{registry_name}}"
  }
}
"#;

/// Project README written at the end of setup.
pub const PROJECT_README: &str = r"# {{name}}

A Minecraft {{loader}} mod for {{minecraft_version}}, scaffolded with Modrix.

## Layout

- `src/main/java/` — mod sources under `{{package}}`
- `src/main/resources/assets/{{mod_id}}/` — textures, models, language files
- `modrix/elements/` — Modrix bookkeeping for generated content

## Building

```bash
./gradlew build
```

The built jar lands in `build/libs/`.
";
